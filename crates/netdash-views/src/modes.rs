//! Display modes selected from the dashboard's dropdowns.
//!
//! Each mode parses from the UI's original key and from a short kebab-case
//! alias, and renders back to the original key.

use std::fmt;
use std::str::FromStr;

use netdash_analysis::CentralityMeasure;

use crate::error::ViewError;

/// Node colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Fixed palette indexed by the `louvain community` label.
    Community,
    /// Employment change on a diverging scale.
    Unemployment,
    /// Per-threshold network centrality.
    Centrality,
    /// Literal per-node colour for the source's bias.
    Bias,
}

impl ColorMode {
    pub const ALL: [ColorMode; 4] = [
        ColorMode::Community,
        ColorMode::Unemployment,
        ColorMode::Centrality,
        ColorMode::Bias,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            ColorMode::Community => "louvain community",
            ColorMode::Unemployment => "unemployment",
            ColorMode::Centrality => "centrality",
            ColorMode::Bias => "bias",
        }
    }

    /// Explanatory text shown next to the colour dropdown.
    pub fn description(self) -> &'static str {
        match self {
            ColorMode::Community => {
                "Occupations separate naturally into cognitive skill dominated professions and \
                 physical skill dominated professions. Louvain community detection identifies \
                 the two groupings; not every occupation aligns perfectly, and the ones that \
                 don't belong say interesting things about the skill distributions of jobs."
            }
            ColorMode::Unemployment => {
                "Employment change in May 2020, showing the impact of COVID-19 on the economy, \
                 especially on the retail and service sector. Combine it with workforce size \
                 to see how the pandemic affected each occupation."
            }
            ColorMode::Centrality => {
                "Eigenvector centrality of each artist within the subgraph of artists above \
                 the popularity threshold."
            }
            ColorMode::Bias => "Each news source is coloured by its political bias.",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ColorMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "louvain community" | "community" | "louvain-community" => Ok(ColorMode::Community),
            "unemployment" => Ok(ColorMode::Unemployment),
            "centrality" => Ok(ColorMode::Centrality),
            "bias" => Ok(ColorMode::Bias),
            other => Err(ViewError::invalid_mode("colour", other)),
        }
    }
}

/// Node sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeMode {
    /// Dataset's constant size (0 hides the markers).
    Uniform,
    /// `30 * ln(a + 1) / max(ln(a + 1))` over the population attribute.
    Population,
    /// Popularity divided by three.
    Popularity,
}

impl SizeMode {
    pub const fn key(self) -> &'static str {
        match self {
            SizeMode::Uniform => "None",
            SizeMode::Population => "total_pop",
            SizeMode::Popularity => "popularity",
        }
    }

    /// Explanatory text shown next to the size dropdown.
    pub fn description(self) -> &'static str {
        match self {
            SizeMode::Uniform => "",
            SizeMode::Population => {
                "The size is proportional to the log of the total number of people employed \
                 in each occupation over the whole of Australia. Hover over each occupation \
                 to see how popular it is!"
            }
            SizeMode::Popularity => "The size is proportional to the artist's popularity.",
        }
    }
}

impl fmt::Display for SizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SizeMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" | "none" | "uniform" => Ok(SizeMode::Uniform),
            "total_pop" | "total-pop" | "population" => Ok(SizeMode::Population),
            "popularity" | "Popularity" => Ok(SizeMode::Popularity),
            other => Err(ViewError::invalid_mode("size", other)),
        }
    }
}

/// Random-graph generator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphStyle {
    #[default]
    ErdosRenyi,
    BarabasiAlbert,
    Star,
}

impl GraphStyle {
    pub const fn key(self) -> &'static str {
        match self {
            GraphStyle::ErdosRenyi => "Erdős–Rényi Random Graph",
            GraphStyle::BarabasiAlbert => "Barabási–Albert Random Graph",
            GraphStyle::Star => "Star Graph",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GraphStyle::ErdosRenyi => {
                "Erdős–Rényi is the simplest kind of random graph there is. \
                 We create N nodes and connect them using M edges."
            }
            GraphStyle::BarabasiAlbert => {
                "A Barabási–Albert random graph is more special. \
                 It's desired to replace real world networks more closely. Rich get richer."
            }
            GraphStyle::Star => "A star joins one hub to every other node.",
        }
    }
}

impl fmt::Display for GraphStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GraphStyle {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Erdős–Rényi Random Graph" | "erdos-renyi" => Ok(GraphStyle::ErdosRenyi),
            "Barabási–Albert Random Graph" | "barabasi-albert" => Ok(GraphStyle::BarabasiAlbert),
            "Star Graph" | "star" => Ok(GraphStyle::Star),
            other => Err(ViewError::invalid_mode("graph style", other)),
        }
    }
}

/// Centrality overlay for the random-graph view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CentralityChoice {
    #[default]
    None,
    Eigenvector,
    Betweenness,
    Closeness,
}

impl CentralityChoice {
    pub const fn key(self) -> &'static str {
        match self {
            CentralityChoice::None => "None",
            CentralityChoice::Eigenvector => "Eigencentraility",
            CentralityChoice::Betweenness => "Betweenness",
            CentralityChoice::Closeness => "Closeness",
        }
    }

    pub fn measure(self) -> Option<CentralityMeasure> {
        match self {
            CentralityChoice::None => None,
            CentralityChoice::Eigenvector => Some(CentralityMeasure::Eigenvector),
            CentralityChoice::Betweenness => Some(CentralityMeasure::Betweenness),
            CentralityChoice::Closeness => Some(CentralityMeasure::Closeness),
        }
    }

    /// Colour bar title for the overlay.
    pub fn colorbar_title(self) -> &'static str {
        match self {
            CentralityChoice::None => "",
            CentralityChoice::Eigenvector => "Eigenvector<br>Centrality",
            CentralityChoice::Betweenness => "Betweenness<br>Centrality",
            CentralityChoice::Closeness => "Closeness<br>Centrality",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CentralityChoice::None => "",
            CentralityChoice::Eigenvector => "Eigencentraility is cool",
            CentralityChoice::Betweenness => {
                "Betweenness counts how many shortest paths pass through each node."
            }
            CentralityChoice::Closeness => {
                "Closeness is the inverse mean distance from a node to everything it can reach."
            }
        }
    }
}

impl fmt::Display for CentralityChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CentralityChoice {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" | "none" => Ok(CentralityChoice::None),
            "Eigencentraility" | "eigenvector" => Ok(CentralityChoice::Eigenvector),
            "Betweenness" | "betweenness" => Ok(CentralityChoice::Betweenness),
            "Closeness" | "closeness" => Ok(CentralityChoice::Closeness),
            other => Err(ViewError::invalid_mode("centrality", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_keys_round_trip() {
        for mode in ColorMode::ALL {
            assert_eq!(mode.key().parse::<ColorMode>().unwrap(), mode);
        }
        for mode in [SizeMode::Uniform, SizeMode::Population, SizeMode::Popularity] {
            assert_eq!(mode.to_string().parse::<SizeMode>().unwrap(), mode);
        }
        for style in [GraphStyle::ErdosRenyi, GraphStyle::BarabasiAlbert, GraphStyle::Star] {
            assert_eq!(style.key().parse::<GraphStyle>().unwrap(), style);
        }
        assert_eq!(
            "Eigencentraility".parse::<CentralityChoice>().unwrap(),
            CentralityChoice::Eigenvector
        );
    }

    #[test]
    fn test_kebab_aliases() {
        assert_eq!("community".parse::<ColorMode>().unwrap(), ColorMode::Community);
        assert_eq!("population".parse::<SizeMode>().unwrap(), SizeMode::Population);
        assert_eq!("erdos-renyi".parse::<GraphStyle>().unwrap(), GraphStyle::ErdosRenyi);
        assert_eq!(
            "closeness".parse::<CentralityChoice>().unwrap(),
            CentralityChoice::Closeness
        );
    }

    #[test]
    fn test_unknown_key_is_invalid_mode() {
        let err = "rainbow".parse::<ColorMode>().unwrap_err();
        assert!(matches!(
            err,
            ViewError::InvalidMode { kind: "colour", ref key } if key == "rainbow"
        ));
    }

    #[test]
    fn test_centrality_choice_maps_to_measure() {
        assert_eq!(CentralityChoice::None.measure(), None);
        assert_eq!(
            CentralityChoice::Eigenvector.measure(),
            Some(CentralityMeasure::Eigenvector)
        );
        assert_eq!(
            CentralityChoice::Eigenvector.colorbar_title(),
            "Eigenvector<br>Centrality"
        );
    }
}
