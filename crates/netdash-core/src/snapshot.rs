//! Snapshot and centrality-table persistence.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{CoreError, CoreResult, NetworkGraph};

/// Read a graph and check its structure, without requiring a layout.
pub fn read_graph(path: &Path) -> CoreResult<NetworkGraph> {
    let contents = fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph: NetworkGraph =
        serde_json::from_str(&contents).map_err(|source| CoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    graph.validate()?;
    Ok(graph)
}

/// Load a dataset snapshot. Every node must already carry its layout position.
pub fn load_snapshot(path: &Path) -> CoreResult<NetworkGraph> {
    let graph = read_graph(path)?;
    graph.require_layout()?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Loaded snapshot"
    );
    Ok(graph)
}

/// Write a snapshot as pretty JSON, creating parent directories.
pub fn save_snapshot(graph: &NetworkGraph, path: &Path) -> CoreResult<()> {
    let io_err = |source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let contents = serde_json::to_string_pretty(graph).map_err(|source| CoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, contents).map_err(io_err)?;
    debug!(path = %path.display(), "Saved snapshot");
    Ok(())
}

#[derive(Debug, Deserialize)]
struct CentralityRow {
    #[serde(rename = "Threshold")]
    threshold: u32,
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Centraility", alias = "Centrality")]
    centrality: f64,
}

/// Per-threshold allow-lists: `threshold -> { node name -> centrality }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentralityTable {
    buckets: BTreeMap<u32, HashMap<String, f64>>,
}

impl CentralityTable {
    /// Load from a CSV file with `Threshold,ID,Centraility` columns.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let reader = csv::Reader::from_path(path).map_err(|source| CoreError::Table {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::read(reader, path)?;
        info!(
            path = %path.display(),
            thresholds = table.buckets.len(),
            "Loaded centrality table"
        );
        Ok(table)
    }

    /// Parse CSV from any reader; `origin` is only used in error messages.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> CoreResult<Self> {
        Self::read(csv::Reader::from_reader(reader), origin)
    }

    fn read<R: Read>(mut reader: csv::Reader<R>, origin: &Path) -> CoreResult<Self> {
        let mut table = Self::default();
        for row in reader.deserialize::<CentralityRow>() {
            let row = row.map_err(|source| CoreError::Table {
                path: origin.to_path_buf(),
                source,
            })?;
            table.insert(row.threshold, row.id, row.centrality);
        }
        Ok(table)
    }

    /// Add one `(threshold, node) -> centrality` entry.
    pub fn insert(&mut self, threshold: u32, id: impl Into<String>, centrality: f64) {
        self.buckets
            .entry(threshold)
            .or_default()
            .insert(id.into(), centrality);
    }

    /// The allow-list for one threshold.
    pub fn bucket(&self, threshold: u32) -> Option<&HashMap<String, f64>> {
        self.buckets.get(&threshold)
    }

    /// Thresholds with a precomputed allow-list, ascending.
    pub fn thresholds(&self) -> Vec<u32> {
        self.buckets.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Which eigenvector a genre centrality row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Eigenvector {
    First,
    Second,
}

impl Eigenvector {
    pub const fn key(self) -> &'static str {
        match self {
            Eigenvector::First => "first",
            Eigenvector::Second => "second",
        }
    }

    /// Accepts `first`/`second` in any case.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "first" => Some(Eigenvector::First),
            "second" => Some(Eigenvector::Second),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenreRow {
    #[serde(rename = "Eigenvector")]
    eigenvector: Eigenvector,
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "Threshold")]
    threshold: u32,
    #[serde(rename = "Centraility", alias = "Centrality")]
    centrality: f64,
}

/// Per-artist centrality rows averaged by eigenvector, genre and threshold.
///
/// Genres iterate in name order and thresholds ascend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreCentralityTable {
    sums: BTreeMap<Eigenvector, BTreeMap<String, BTreeMap<u32, (f64, usize)>>>,
}

impl GenreCentralityTable {
    /// Load from a CSV file with `Eigenvector,Genre,Threshold,Centraility`
    /// columns; any other columns are ignored.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let reader = csv::Reader::from_path(path).map_err(|source| CoreError::Table {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::read(reader, path)?;
        info!(
            path = %path.display(),
            genres = table.genres(Eigenvector::First).len(),
            "Loaded genre centrality table"
        );
        Ok(table)
    }

    /// Parse CSV from any reader; `origin` is only used in error messages.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> CoreResult<Self> {
        Self::read(csv::Reader::from_reader(reader), origin)
    }

    fn read<R: Read>(mut reader: csv::Reader<R>, origin: &Path) -> CoreResult<Self> {
        let mut table = Self::default();
        for row in reader.deserialize::<GenreRow>() {
            let row = row.map_err(|source| CoreError::Table {
                path: origin.to_path_buf(),
                source,
            })?;
            table.insert(row.eigenvector, row.genre, row.threshold, row.centrality);
        }
        Ok(table)
    }

    /// Add one artist's centrality to its group.
    pub fn insert(
        &mut self,
        eigenvector: Eigenvector,
        genre: impl Into<String>,
        threshold: u32,
        centrality: f64,
    ) {
        let entry = self
            .sums
            .entry(eigenvector)
            .or_default()
            .entry(genre.into())
            .or_default()
            .entry(threshold)
            .or_insert((0.0, 0));
        entry.0 += centrality;
        entry.1 += 1;
    }

    pub fn genres(&self, eigenvector: Eigenvector) -> Vec<&str> {
        self.sums
            .get(&eigenvector)
            .map(|genres| genres.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// `(threshold, mean centrality)` points for one genre, ascending.
    pub fn series(&self, eigenvector: Eigenvector, genre: &str) -> Vec<(u32, f64)> {
        self.sums
            .get(&eigenvector)
            .and_then(|genres| genres.get(genre))
            .map(|points| {
                points
                    .iter()
                    .map(|(&threshold, &(sum, count))| (threshold, sum / count as f64))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Mean centrality of one genre at one threshold.
    pub fn mean(&self, eigenvector: Eigenvector, genre: &str, threshold: u32) -> Option<f64> {
        let &(sum, count) = self.sums.get(&eigenvector)?.get(genre)?.get(&threshold)?;
        Some(sum / count as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }
}
