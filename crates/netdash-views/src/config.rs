//! Dashboard configuration.
//!
//! Precedence, lowest first: built-in defaults, the JSON config file in the
//! platform config directory, `NETDASH_*` environment variables (a `.env`
//! file is honoured), then whatever the caller overrides.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

/// Where the datasets live and how the server runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base directory for relative dataset paths.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Labour network snapshot.
    #[serde(default = "default_labour_snapshot")]
    pub labour_snapshot: PathBuf,

    /// Collaboration core graph snapshot.
    #[serde(default = "default_collaboration_snapshot")]
    pub collaboration_snapshot: PathBuf,

    /// Per-threshold centrality table for the collaboration graph.
    #[serde(default = "default_centrality_table")]
    pub centrality_table: PathBuf,

    /// Information-flow snapshot; the dataset is disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_snapshot: Option<PathBuf>,

    /// Per-artist genre centrality table; the genre charts are disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_table: Option<PathBuf>,

    /// HTTP port for `serve`.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seed for the random-graph view; OS entropy when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain_seed: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_labour_snapshot() -> PathBuf {
    PathBuf::from("skill_scape_graph.json")
}

fn default_collaboration_snapshot() -> PathBuf {
    PathBuf::from("spotify_core_graph.json")
}

fn default_centrality_table() -> PathBuf {
    PathBuf::from("top100results.csv")
}

fn default_port() -> u16 {
    8050
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            labour_snapshot: default_labour_snapshot(),
            collaboration_snapshot: default_collaboration_snapshot(),
            centrality_table: default_centrality_table(),
            flow_snapshot: None,
            genre_table: None,
            port: default_port(),
            explain_seed: None,
        }
    }
}

/// Keys accepted by [`DashboardConfig::get`] and [`DashboardConfig::set`].
pub const CONFIG_KEYS: [&str; 8] = [
    "data-dir",
    "labour-snapshot",
    "collaboration-snapshot",
    "centrality-table",
    "flow-snapshot",
    "genre-table",
    "port",
    "explain-seed",
];

impl DashboardConfig {
    /// Load from the config file, then apply environment overrides.
    pub fn load() -> ViewResult<Self> {
        // Missing .env is fine.
        let _ = dotenvy::dotenv();

        let config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Read a config file; absent fields take their defaults.
    pub fn from_file(path: &Path) -> ViewResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Apply `NETDASH_*` overrides read through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> ViewResult<Self> {
        for key in CONFIG_KEYS {
            let var = format!("NETDASH_{}", key.replace('-', "_").to_uppercase());
            if let Some(value) = lookup(&var) {
                self.set(key, &value)?;
            }
        }
        Ok(self)
    }

    /// Save to the config file, creating its directory.
    pub fn save(&self) -> ViewResult<()> {
        let path = Self::config_file_path()
            .ok_or_else(|| ViewError::Config("no config directory on this platform".into()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> ViewResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "netdash", "netdash")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Resolve a dataset path against `data_dir`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn labour_path(&self) -> PathBuf {
        self.resolve(&self.labour_snapshot)
    }

    pub fn collaboration_path(&self) -> PathBuf {
        self.resolve(&self.collaboration_snapshot)
    }

    pub fn centrality_table_path(&self) -> PathBuf {
        self.resolve(&self.centrality_table)
    }

    pub fn flow_path(&self) -> Option<PathBuf> {
        self.flow_snapshot.as_deref().map(|p| self.resolve(p))
    }

    pub fn genre_table_path(&self) -> Option<PathBuf> {
        self.genre_table.as_deref().map(|p| self.resolve(p))
    }

    /// Read one value by key, rendered as text. Unset optionals read as `None`.
    pub fn get(&self, key: &str) -> ViewResult<Option<String>> {
        let value = match key {
            "data-dir" => Some(self.data_dir.display().to_string()),
            "labour-snapshot" => Some(self.labour_snapshot.display().to_string()),
            "collaboration-snapshot" => Some(self.collaboration_snapshot.display().to_string()),
            "centrality-table" => Some(self.centrality_table.display().to_string()),
            "flow-snapshot" => self.flow_snapshot.as_ref().map(|p| p.display().to_string()),
            "genre-table" => self.genre_table.as_ref().map(|p| p.display().to_string()),
            "port" => Some(self.port.to_string()),
            "explain-seed" => self.explain_seed.map(|s| s.to_string()),
            other => return Err(unknown_key(other)),
        };
        Ok(value)
    }

    /// Set one value by key. An empty value clears an optional setting.
    pub fn set(&mut self, key: &str, value: &str) -> ViewResult<()> {
        match key {
            "data-dir" => self.data_dir = PathBuf::from(value),
            "labour-snapshot" => self.labour_snapshot = PathBuf::from(value),
            "collaboration-snapshot" => self.collaboration_snapshot = PathBuf::from(value),
            "centrality-table" => self.centrality_table = PathBuf::from(value),
            "flow-snapshot" => {
                self.flow_snapshot = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "genre-table" => {
                self.genre_table = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "port" => {
                self.port = value
                    .parse()
                    .map_err(|_| ViewError::Config(format!("invalid port '{value}'")))?;
            }
            "explain-seed" => {
                self.explain_seed = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| {
                        ViewError::Config(format!("invalid explain seed '{value}'"))
                    })?)
                };
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ViewError {
    ViewError::Config(format!(
        "unknown key '{key}', expected one of: {}",
        CONFIG_KEYS.join(", ")
    ))
}
