use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use once_cell::sync::OnceCell;

use super::loader::load_file;
use super::model::Dataset;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Source resolution: first existing candidate wins
// ---------------------------------------------------------------------------

/// Ordered list of places a table may live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub candidates: Vec<PathBuf>,
}

impl DataSource {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// The first candidate that exists on disk.
    pub fn resolve(&self) -> Result<&Path, LoadError> {
        for (i, path) in self.candidates.iter().enumerate() {
            if path.exists() {
                if i > 0 {
                    warn!("Falling back to {}", path.display());
                }
                return Ok(path);
            }
        }
        Err(LoadError::NoSource {
            checked: self.candidates.clone(),
        })
    }

    pub fn load(&self) -> Result<Dataset, LoadError> {
        load_file(self.resolve()?)
    }
}

// ---------------------------------------------------------------------------
// Load-once cache
// ---------------------------------------------------------------------------

/// Holds the session's dataset after the first successful load.
/// A failed load leaves the cache empty so the next call retries.
#[derive(Debug, Default)]
pub struct DatasetCache {
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, source: &DataSource) -> Result<Arc<Dataset>, LoadError> {
        self.cell
            .get_or_try_init(|| {
                let dataset = source.load()?;
                info!("Cached dataset with {} rows", dataset.len());
                Ok::<_, LoadError>(Arc::new(dataset))
            })
            .cloned()
    }

    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.cell.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(name);
        p
    }

    #[test]
    fn resolve_skips_missing_candidates() {
        let present = tmp("scout_board_source_present.csv");
        std::fs::write(&present, "Nombre,Equipo\nAna,X\n").unwrap();
        let source = DataSource::new(vec![tmp("scout_board_source_absent.csv"), present.clone()]);
        assert_eq!(source.resolve().unwrap(), present.as_path());
    }

    #[test]
    fn resolve_reports_every_checked_path() {
        let source = DataSource::new(vec![
            tmp("scout_board_nope_a.csv"),
            tmp("scout_board_nope_b.parquet"),
        ]);
        match source.resolve() {
            Err(LoadError::NoSource { checked }) => assert_eq!(checked.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cache_loads_once() {
        let path = tmp("scout_board_cache_once.csv");
        std::fs::write(&path, "Nombre,Equipo\nAna,X\n").unwrap();
        let source = DataSource::new(vec![path.clone()]);
        let cache = DatasetCache::new();

        let first = cache.get_or_load(&source).unwrap();
        std::fs::write(&path, "Nombre,Equipo\nAna,X\nBea,Y\n").unwrap();
        let second = cache.get_or_load(&source).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let cache = DatasetCache::new();
        let source = DataSource::new(vec![tmp("scout_board_cache_missing.csv")]);
        assert!(cache.get_or_load(&source).is_err());
        assert!(cache.get().is_none());
    }
}
