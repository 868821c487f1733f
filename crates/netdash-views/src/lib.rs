//! Incremental figure views for the netdash datasets.
//!
//! Static datasets (labour, collaboration, information flow) share
//! [`IncrementalView`], which keeps a two-layer [`netdash_core::Figure`] and
//! updates only the layer a parameter change affects. The random-graph
//! [`ExplainView`] rebuilds everything per call. [`Dashboard`] bundles one
//! view per dataset for the serving layer.

pub mod collaboration;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod explain;
pub mod flow;
pub mod genres;
pub mod incremental;
pub mod labour;
pub mod modes;
pub mod profile;
pub mod sizing;

pub use collaboration::{CollaborationProfile, CollaborationView};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{ViewError, ViewResult};
pub use explain::{ExplainParams, ExplainView};
pub use flow::{FlowView, InformationFlowProfile};
pub use genres::{GenreCentrality, GenreCentralityView, GenreHighlight, GenreSeries};
pub use incremental::{IncrementalView, ViewState};
pub use labour::{LabourProfile, LabourView};
pub use modes::{CentralityChoice, ColorMode, GraphStyle, SizeMode};
pub use profile::DatasetProfile;
