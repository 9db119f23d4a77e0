use std::cmp::Ordering;

use log::debug;

use super::model::{CellValue, Dataset};
use crate::error::MissingColumnError;

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// The top `limit` rows ordered by `metric`, highest first.
///
/// Ties keep their input order. Cells without a numeric value sort after
/// every numeric cell.
pub fn rank_by(
    dataset: &Dataset,
    metric: &str,
    limit: usize,
) -> Result<Dataset, MissingColumnError> {
    dataset.require_column(metric)?;

    let mut order: Vec<(usize, Option<f64>)> = dataset
        .records
        .iter()
        .enumerate()
        .map(|(i, rec)| (i, rec.get(metric).as_f64()))
        .collect();
    // `sort_by` is stable.
    order.sort_by(|(_, a), (_, b)| descending(*a, *b));

    let indices: Vec<usize> = order.into_iter().take(limit).map(|(i, _)| i).collect();
    debug!("Ranked {} rows by {metric}, kept {}", dataset.len(), indices.len());
    Ok(dataset.select(&indices))
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Per-entity metric summary
// ---------------------------------------------------------------------------

/// Sum of one metric across an entity's rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTotal {
    pub metric: String,
    pub total: f64,
}

/// Metric totals for one entity, in the order the metrics were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub entity: CellValue,
    /// Number of rows the totals were summed over.
    pub rows: usize,
    pub totals: Vec<MetricTotal>,
}

impl EntitySummary {
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.totals
            .iter()
            .find(|t| t.metric == metric)
            .map(|t| t.total)
    }

    pub fn values(&self) -> Vec<f64> {
        self.totals.iter().map(|t| t.total).collect()
    }
}

/// Sum each of `metrics` over every row whose `entity_column` equals `entity`.
///
/// Missing or non-numeric cells count as 0, and an unknown entity yields a
/// zero for every requested metric.
pub fn summarize_entity(
    dataset: &Dataset,
    entity_column: &str,
    entity: &CellValue,
    metrics: &[String],
) -> EntitySummary {
    let mut totals: Vec<MetricTotal> = metrics
        .iter()
        .map(|m| MetricTotal {
            metric: m.clone(),
            total: 0.0,
        })
        .collect();

    let mut rows = 0;
    for rec in dataset.records.iter().filter(|r| r.get(entity_column) == entity) {
        rows += 1;
        for t in &mut totals {
            t.total += rec.get(&t.metric).as_f64().unwrap_or(0.0);
        }
    }

    EntitySummary {
        entity: entity.clone(),
        rows,
        totals,
    }
}
