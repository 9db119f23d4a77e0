use std::collections::BTreeMap;

use log::debug;

use crate::data::model::{CellValue, Dataset};
use crate::error::MissingColumnError;

/// Team label → badge image URL. Fetching the image is left to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeIndex {
    urls: BTreeMap<CellValue, String>,
}

impl BadgeIndex {
    /// Build from a badge table with a team column and a URL column.
    /// Later rows for the same team override earlier ones; blank URLs are skipped.
    pub fn from_dataset(
        dataset: &Dataset,
        team_column: &str,
        url_column: &str,
    ) -> Result<Self, MissingColumnError> {
        dataset.require_column(team_column)?;
        dataset.require_column(url_column)?;

        let mut urls = BTreeMap::new();
        for rec in &dataset.records {
            let url = rec.get(url_column).to_string();
            if url.trim().is_empty() {
                continue;
            }
            urls.insert(rec.get(team_column).clone(), url);
        }
        debug!("Indexed {} team badges", urls.len());
        Ok(Self { urls })
    }

    pub fn url_for(&self, team: &CellValue) -> Option<&str> {
        self.urls.get(team).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
