//! Application-scoped context holding one view per dataset.

use tracing::info;

use crate::collaboration::CollaborationView;
use crate::config::DashboardConfig;
use crate::error::ViewResult;
use crate::explain::ExplainView;
use crate::flow::FlowView;
use crate::genres::GenreCentralityView;
use crate::labour::LabourView;

/// Every dataset view, built once at start.
#[derive(Debug)]
pub struct Dashboard {
    pub labour: LabourView,
    pub collaboration: CollaborationView,
    /// `None` when no information-flow snapshot is configured.
    pub flow: Option<FlowView>,
    /// `None` when no genre centrality table is configured.
    pub genres: Option<GenreCentralityView>,
    pub explain: ExplainView,
}

impl Dashboard {
    /// Load every configured dataset. Any load failure is fatal.
    pub fn load(config: &DashboardConfig) -> ViewResult<Self> {
        let labour = LabourView::load(&config.labour_path())?;
        let collaboration = CollaborationView::load(
            &config.collaboration_path(),
            &config.centrality_table_path(),
        )?;
        let flow = config
            .flow_path()
            .map(|path| FlowView::load(&path))
            .transpose()?;
        let genres = config
            .genre_table_path()
            .map(|path| GenreCentralityView::load(&path))
            .transpose()?;
        let explain = ExplainView::new(config.explain_seed);

        info!(
            flow = flow.is_some(),
            genres = genres.is_some(),
            seeded = config.explain_seed.is_some(),
            "Dashboard ready"
        );

        Ok(Self {
            labour,
            collaboration,
            flow,
            genres,
            explain,
        })
    }
}
