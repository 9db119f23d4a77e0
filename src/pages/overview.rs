use log::debug;

use super::{slider, Controls, PageContext};
use crate::data::filter::{all_rows_for_group, apply_filter};
use crate::data::model::{CellValue, Dataset};
use crate::data::rank::rank_by;
use crate::error::MissingColumnError;
use crate::table::TableView;

/// Sidebar state for the filters-and-ranking page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewSelection {
    pub team: Option<CellValue>,
    pub league: Option<CellValue>,
    pub age: Option<(f64, f64)>,
    pub matches: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewPage {
    pub controls: Controls,
    /// First rows of the filtered view.
    pub preview: TableView,
    /// Whole squad of the selected team, regardless of playing time.
    pub roster: Option<TableView>,
    /// Top rows of the filtered view by the ranking metric.
    pub ranking: TableView,
    /// Full filtered view in ranking order, for download.
    pub export: Dataset,
    pub export_name: String,
}

pub fn render(
    ctx: &PageContext<'_>,
    sel: &OverviewSelection,
) -> Result<OverviewPage, MissingColumnError> {
    let config = ctx.config;
    let controls = Controls::build(ctx, true)?;

    let spec = ctx.spec(
        sel.team.as_ref(),
        sel.league.as_ref(),
        slider(sel.age, controls.age),
        slider(sel.matches, controls.matches),
    )?;
    let filtered = apply_filter(ctx.dataset, &spec)?;

    let roster = sel
        .team
        .as_ref()
        .map(|team| ctx.table(&all_rows_for_group(ctx.dataset, &config.columns.team, team)));

    let full_ranking = rank_by(&filtered, &config.ranking_metric, filtered.len())?;
    let ranking = ctx.table(&full_ranking.head(config.ranking_limit));
    debug!(
        "Overview: {} filtered rows, ranking by {}",
        filtered.len(),
        config.ranking_metric
    );

    Ok(OverviewPage {
        controls,
        preview: ctx.table(&filtered.head(config.preview_rows)),
        roster,
        ranking,
        export: full_ranking,
        export_name: format!("ranking_{}", config.ranking_metric.to_lowercase()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::BadgeIndex;
    use crate::config::DashboardConfig;
    use crate::pages::fixtures::{column_values, squad};

    #[test]
    fn unfiltered_overview_ranks_everyone() {
        let ds = squad();
        let config = DashboardConfig::default();
        let badges = BadgeIndex::default();
        let ctx = PageContext {
            dataset: &ds,
            config: &config,
            badges: &badges,
        };

        let page = render(&ctx, &OverviewSelection::default()).unwrap();
        assert_eq!(page.preview.len(), 6);
        assert!(page.roster.is_none());
        assert_eq!(
            column_values(&page.ranking, "Nombre"),
            vec!["Cris", "Ana", "Dani", "Ana", "Bea", "Eva"]
        );
        assert_eq!(page.export_name, "ranking_goles");
        assert_eq!(page.controls.leagues.len(), 2);
    }

    #[test]
    fn team_selection_shows_roster_beyond_playing_time_filter() {
        let ds = squad();
        let config = DashboardConfig::default();
        let badges = BadgeIndex::default();
        let ctx = PageContext {
            dataset: &ds,
            config: &config,
            badges: &badges,
        };

        let sel = OverviewSelection {
            team: Some("Leganés".into()),
            matches: Some((5.0, 30.0)),
            ..OverviewSelection::default()
        };
        let page = render(&ctx, &sel).unwrap();
        assert_eq!(column_values(&page.ranking, "Nombre"), vec!["Ana"]);
        let roster = page.roster.unwrap();
        assert_eq!(column_values(&roster, "Nombre"), vec!["Ana", "Bea"]);
    }

    #[test]
    fn ranking_respects_limit_but_export_keeps_all() {
        let ds = squad();
        let config = DashboardConfig {
            ranking_limit: 2,
            ..DashboardConfig::default()
        };
        let badges = BadgeIndex::default();
        let ctx = PageContext {
            dataset: &ds,
            config: &config,
            badges: &badges,
        };

        let page = render(&ctx, &OverviewSelection::default()).unwrap();
        assert_eq!(page.ranking.len(), 2);
        assert_eq!(page.export.len(), 6);
    }
}
