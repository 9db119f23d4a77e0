//! Headless page models.
//!
//! Each page turns a selection into the tables and chart series a renderer
//! draws. Pages share the engine in `data::filter` / `data::rank` and own
//! no filtering logic of their own.

pub mod comparison;
pub mod overview;
pub mod search;

use crate::badges::BadgeIndex;
use crate::config::DashboardConfig;
use crate::data::filter::{all_rows_for_group, distinct_values, FilterSpec};
use crate::data::model::{CellValue, Dataset, NumericRange};
use crate::data::rank::{summarize_entity, EntitySummary};
use crate::error::MissingColumnError;
use crate::table::TableView;

/// Read-only inputs every page renders from.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub dataset: &'a Dataset,
    pub config: &'a DashboardConfig,
    pub badges: &'a BadgeIndex,
}

impl PageContext<'_> {
    pub fn table(&self, dataset: &Dataset) -> TableView {
        TableView::build(dataset, &self.config.columns, self.badges)
    }

    /// Spec for the given selections, ranges clamped to the loaded data.
    /// A `None` range leaves that dimension unconstrained.
    fn spec(
        &self,
        team: Option<&CellValue>,
        league: Option<&CellValue>,
        age: Option<(f64, f64)>,
        matches: Option<(f64, f64)>,
    ) -> Result<FilterSpec, MissingColumnError> {
        let mut builder = FilterSpec::builder(self.dataset, &self.config.columns)?;
        if let Some(team) = team {
            builder = builder.team(team.clone());
        }
        if let Some(league) = league {
            builder = builder.league(league.clone());
        }
        if let Some((lo, hi)) = age {
            builder = builder.age_range(lo, hi);
        }
        if let Some((lo, hi)) = matches {
            builder = builder.matches_range(lo, hi);
        }
        Ok(builder.build())
    }

    fn player_detail(&self, name: &CellValue) -> PlayerDetail {
        let columns = &self.config.columns;
        let rows = all_rows_for_group(self.dataset, &columns.name, name);
        let summary =
            summarize_entity(self.dataset, &columns.name, name, &self.config.summary_metrics);
        PlayerDetail {
            name: name.clone(),
            table: self.table(&rows),
            rows,
            summary,
        }
    }
}

/// Options the sidebar offers, taken from the full dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub teams: Vec<CellValue>,
    /// Empty on pages without a league selector.
    pub leagues: Vec<CellValue>,
    pub age: Option<NumericRange>,
    pub matches: Option<NumericRange>,
}

impl Controls {
    fn build(ctx: &PageContext<'_>, with_league: bool) -> Result<Self, MissingColumnError> {
        let columns = &ctx.config.columns;
        let leagues = if with_league {
            distinct_values(ctx.dataset, &columns.league)?
        } else {
            Vec::new()
        };
        Ok(Controls {
            teams: distinct_values(ctx.dataset, &columns.team)?,
            leagues,
            age: ctx.dataset.column_extent(&columns.age)?,
            matches: ctx.dataset.column_extent(&columns.matches)?,
        })
    }
}

/// Every row of one player plus their metric totals.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDetail {
    pub name: CellValue,
    pub rows: Dataset,
    pub table: TableView,
    pub summary: EntitySummary,
}

/// Slider position: the user's range, or the full extent when untouched.
/// A page without the slider passes `None` instead.
fn slider(selected: Option<(f64, f64)>, extent: Option<NumericRange>) -> Option<(f64, f64)> {
    selected.or_else(|| extent.map(|r| (r.min(), r.max())))
}

/// The current selection if it is still offered, otherwise the first option.
fn pick(options: &[CellValue], selected: Option<&CellValue>) -> Option<CellValue> {
    selected
        .filter(|s| options.contains(s))
        .or_else(|| options.first())
        .cloned()
}
