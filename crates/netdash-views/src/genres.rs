//! Average eigenvector centrality per artist genre, across popularity
//! thresholds, for the collaboration tab's line charts.

use std::path::Path;

use netdash_core::{Eigenvector, GenreCentralityTable};
use serde::Serialize;

use crate::error::{ViewError, ViewResult};

/// One genre's line: mean centrality at each threshold, ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreSeries {
    pub genre: String,
    pub points: Vec<(u32, f64)>,
}

/// The most central genre at the selected threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreHighlight {
    pub genre: String,
    pub threshold: u32,
    pub centrality: f64,
    pub hovertext: String,
}

/// Everything the chart for one eigenvector needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreCentrality {
    pub eigenvector: Eigenvector,
    pub title: &'static str,
    pub series: Vec<GenreSeries>,
    pub highlight: GenreHighlight,
}

pub fn parse_eigenvector(key: &str) -> ViewResult<Eigenvector> {
    Eigenvector::from_key(key).ok_or_else(|| ViewError::invalid_mode("eigenvector", key))
}

fn title(eigenvector: Eigenvector) -> &'static str {
    match eigenvector {
        Eigenvector::First => "First Eigenvector (Eigencentraility)",
        Eigenvector::Second => "Second Eigenvector",
    }
}

fn hovertext(eigenvector: Eigenvector, threshold: u32) -> String {
    match eigenvector {
        Eigenvector::First => format!(
            "Average Centrality of\nMost Central Group of\nArtists at threshold {threshold}"
        ),
        Eigenvector::Second => {
            format!("Average Second Eigenvector Value\n of group at threshold {threshold}")
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenreCentralityView {
    table: GenreCentralityTable,
}

impl GenreCentralityView {
    pub fn new(table: GenreCentralityTable) -> Self {
        Self { table }
    }

    pub fn load(path: &Path) -> ViewResult<Self> {
        Ok(Self::new(GenreCentralityTable::load(path)?))
    }

    /// Every genre's series plus the top genre at `threshold`.
    ///
    /// Ties go to the genre whose name sorts last. No genre with a value at
    /// `threshold` is a `MissingThresholdBucket`.
    pub fn centrality(
        &self,
        eigenvector: Eigenvector,
        threshold: u32,
    ) -> ViewResult<GenreCentrality> {
        let mut best: Option<(&str, f64)> = None;
        let mut series = Vec::new();

        for genre in self.table.genres(eigenvector) {
            if let Some(mean) = self.table.mean(eigenvector, genre, threshold) {
                if best.map_or(true, |(_, top)| mean >= top) {
                    best = Some((genre, mean));
                }
            }
            series.push(GenreSeries {
                genre: genre.to_string(),
                points: self.table.series(eigenvector, genre),
            });
        }

        let (genre, centrality) = best.ok_or(ViewError::MissingThresholdBucket { threshold })?;
        Ok(GenreCentrality {
            eigenvector,
            title: title(eigenvector),
            series,
            highlight: GenreHighlight {
                genre: genre.to_string(),
                threshold,
                centrality,
                hovertext: hovertext(eigenvector, threshold),
            },
        })
    }
}
