use std::sync::Arc;

use log::{error, warn};

use crate::badges::BadgeIndex;
use crate::config::DashboardConfig;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::data::source::{DataSource, DatasetCache};
use crate::error::{LoadError, MissingColumnError};
use crate::pages::comparison::{self, ComparisonPage, ComparisonSelection};
use crate::pages::overview::{self, OverviewPage, OverviewSelection};
use crate::pages::search::{self, SearchPage, SearchSelection};
use crate::pages::PageContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    Search,
    Comparison,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Overview(OverviewPage),
    Search(SearchPage),
    Comparison(ComparisonPage),
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One user's view of a loaded dataset. The dataset is shared read-only;
/// each page keeps its own selections.
pub struct Session {
    dataset: Arc<Dataset>,
    badges: Arc<BadgeIndex>,
    config: DashboardConfig,

    /// Page currently shown.
    pub page: Page,
    pub overview: OverviewSelection,
    pub search: SearchSelection,
    pub comparison: ComparisonSelection,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>, badges: Arc<BadgeIndex>, config: DashboardConfig) -> Self {
        Self {
            dataset,
            badges,
            config,
            page: Page::default(),
            overview: OverviewSelection::default(),
            search: SearchSelection::default(),
            comparison: ComparisonSelection::default(),
            status_message: None,
        }
    }

    /// Open a session on the configured sources. The player table goes
    /// through `cache`; a missing or unreadable badge table only disables badges.
    pub fn open(config: DashboardConfig, cache: &DatasetCache) -> Result<Self, LoadError> {
        let dataset = cache.get_or_load(&DataSource::new(config.data_paths.clone()))?;
        let badges = load_badges(&config);
        Ok(Self::new(dataset, Arc::new(badges), config))
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn context(&self) -> PageContext<'_> {
        PageContext {
            dataset: &self.dataset,
            config: &self.config,
            badges: &self.badges,
        }
    }

    pub fn select_page(&mut self, page: Page) {
        self.page = page;
    }

    /// Recompute the current page from the full dataset.
    pub fn render(&self) -> Result<PageView, MissingColumnError> {
        let ctx = self.context();
        Ok(match self.page {
            Page::Overview => PageView::Overview(overview::render(&ctx, &self.overview)?),
            Page::Search => PageView::Search(search::render(&ctx, &self.search)?),
            Page::Comparison => PageView::Comparison(comparison::render(&ctx, &self.comparison)?),
        })
    }

    /// Like [`render`](Self::render), but a failure becomes the status message.
    pub fn refresh(&mut self) -> Option<PageView> {
        match self.render() {
            Ok(view) => {
                self.status_message = None;
                Some(view)
            }
            Err(e) => {
                error!("{e}");
                self.status_message = Some(e.to_string());
                None
            }
        }
    }
}

fn load_badges(config: &DashboardConfig) -> BadgeIndex {
    let source = DataSource::new(config.badge_paths.clone());
    let table = match source.resolve().and_then(load_file) {
        Ok(table) => table,
        Err(e) => {
            warn!("Team badges unavailable: {e}");
            return BadgeIndex::default();
        }
    };
    let columns = &config.columns;
    BadgeIndex::from_dataset(&table, &columns.team, &columns.badge_url).unwrap_or_else(|e| {
        warn!("Team badges unavailable: {e}");
        BadgeIndex::default()
    })
}
