use log::debug;

use super::{pick, slider, Controls, PageContext, PlayerDetail};
use crate::chart::{comparison_series, ChartSeries};
use crate::data::filter::{apply_filter, distinct_values};
use crate::data::model::{CellValue, Dataset};
use crate::error::MissingColumnError;

/// Sidebar state for the head-to-head page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSelection {
    pub team: Option<CellValue>,
    pub matches: Option<(f64, f64)>,
    pub first: Option<CellValue>,
    pub second: Option<CellValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPage {
    pub controls: Controls,
    pub players: Vec<CellValue>,
    pub comparison: Option<Comparison>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub first: PlayerDetail,
    pub second: PlayerDetail,
    /// Two series, first player then second, for radar and grouped bars.
    pub series: Vec<ChartSeries>,
    /// Both players' rows stacked.
    pub export: Dataset,
    pub export_name: String,
}

pub fn render(
    ctx: &PageContext<'_>,
    sel: &ComparisonSelection,
) -> Result<ComparisonPage, MissingColumnError> {
    let controls = Controls::build(ctx, false)?;
    // No age slider on this page: age never narrows the player list.
    let spec = ctx.spec(
        sel.team.as_ref(),
        None,
        None,
        slider(sel.matches, controls.matches),
    )?;
    let filtered = apply_filter(ctx.dataset, &spec)?;
    let players = distinct_values(&filtered, &ctx.config.columns.name)?;

    let first = pick(&players, sel.first.as_ref());
    let second = pick(&players, sel.second.as_ref());
    let comparison = match (first, second) {
        (Some(a), Some(b)) => {
            debug!("Comparing {a} with {b}");
            let first = ctx.player_detail(&a);
            let second = ctx.player_detail(&b);
            let series = comparison_series(&[&first.summary, &second.summary]);
            Some(Comparison {
                export: first.rows.concat(&second.rows),
                export_name: format!("comparativa_{a}_vs_{b}"),
                first,
                second,
                series,
            })
        }
        _ => None,
    };

    Ok(ComparisonPage {
        controls,
        players,
        comparison,
    })
}
