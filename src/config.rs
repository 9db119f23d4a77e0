use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;

pub const ENV_DATA_PATH: &str = "SCOUT_DATA_PATH";
pub const ENV_BADGES_PATH: &str = "SCOUT_BADGES_PATH";
pub const ENV_RANKING_LIMIT: &str = "SCOUT_RANKING_LIMIT";

// ---------------------------------------------------------------------------
// Column bindings
// ---------------------------------------------------------------------------

/// Header names of the columns the engine and pages read.
/// Defaults match the scouting spreadsheet headers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub name: String,
    pub team: String,
    pub league: String,
    pub age: String,
    pub matches: String,
    pub starts: String,
    pub goals: String,
    pub season: String,
    pub badge_url: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: "Nombre".to_string(),
            team: "Equipo".to_string(),
            league: "Liga".to_string(),
            age: "Edad".to_string(),
            matches: "PJ".to_string(),
            starts: "Titular".to_string(),
            goals: "Goles".to_string(),
            season: "Temporada".to_string(),
            badge_url: "url_escudo".to_string(),
        }
    }
}

impl ColumnNames {
    /// Display order used by tables: identity first, then playing time and output.
    pub fn preferred_order(&self) -> [&str; 8] {
        [
            self.name.as_str(),
            self.team.as_str(),
            self.age.as_str(),
            self.matches.as_str(),
            self.starts.as_str(),
            self.goals.as_str(),
            self.season.as_str(),
            self.league.as_str(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub columns: ColumnNames,
    /// Candidate player tables, tried in order.
    pub data_paths: Vec<PathBuf>,
    /// Candidate badge tables, tried in order.
    pub badge_paths: Vec<PathBuf>,
    /// Rows shown in filtered previews.
    pub preview_rows: usize,
    /// Rows kept in the overview ranking.
    pub ranking_limit: usize,
    /// Column the overview ranking sorts by.
    pub ranking_metric: String,
    /// Metrics summed per player for the radar/bar charts.
    pub summary_metrics: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let columns = ColumnNames::default();
        let summary_metrics = vec![
            columns.goals.clone(),
            columns.starts.clone(),
            columns.matches.clone(),
        ];
        Self {
            ranking_metric: columns.goals.clone(),
            summary_metrics,
            columns,
            data_paths: vec![
                PathBuf::from("data/jugadoras.parquet"),
                PathBuf::from("data/jugadoras.csv"),
                PathBuf::from("data/jugadoras.xlsx"),
            ],
            badge_paths: vec![
                PathBuf::from("data/escudos.csv"),
                PathBuf::from("data/escudos.xlsx"),
            ],
            preview_rows: 10,
            ranking_limit: 10,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file; missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Defaults, or the given file when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Environment variables take precedence over file values.
    /// A data/badge path override is tried before the configured candidates.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DATA_PATH) {
            self.data_paths.insert(0, PathBuf::from(path));
        }
        if let Some(path) = lookup(ENV_BADGES_PATH) {
            self.badge_paths.insert(0, PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_RANKING_LIMIT) {
            match raw.trim().parse::<usize>() {
                Ok(limit) => self.ranking_limit = limit,
                Err(_) => warn!("Ignoring {ENV_RANKING_LIMIT}={raw}: not a row count"),
            }
        }
    }
}
