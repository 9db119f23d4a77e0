use super::{pick, slider, Controls, PageContext, PlayerDetail};
use crate::chart::{comparison_series, ChartSeries};
use crate::data::filter::{apply_filter, distinct_values};
use crate::data::model::CellValue;
use crate::error::MissingColumnError;
use crate::table::TableView;

/// Sidebar state for the player search page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSelection {
    pub team: Option<CellValue>,
    pub age: Option<(f64, f64)>,
    pub matches: Option<(f64, f64)>,
    pub player: Option<CellValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub controls: Controls,
    pub preview: TableView,
    /// Players left after filtering, in first-seen order.
    pub players: Vec<CellValue>,
    pub selected: Option<SelectedPlayer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPlayer {
    pub detail: PlayerDetail,
    pub series: ChartSeries,
    pub export_name: String,
}

pub fn render(
    ctx: &PageContext<'_>,
    sel: &SearchSelection,
) -> Result<SearchPage, MissingColumnError> {
    let controls = Controls::build(ctx, false)?;
    let spec = ctx.spec(
        sel.team.as_ref(),
        None,
        slider(sel.age, controls.age),
        slider(sel.matches, controls.matches),
    )?;
    let filtered = apply_filter(ctx.dataset, &spec)?;
    let players = distinct_values(&filtered, &ctx.config.columns.name)?;

    // Stats come from every season of the player, not just the filtered rows.
    let selected = pick(&players, sel.player.as_ref()).map(|name| {
        let detail = ctx.player_detail(&name);
        let series = comparison_series(&[&detail.summary]).swap_remove(0);
        SelectedPlayer {
            export_name: format!("datos_{name}"),
            detail,
            series,
        }
    });

    Ok(SearchPage {
        controls,
        preview: ctx.table(&filtered.head(ctx.config.preview_rows)),
        players,
        selected,
    })
}
