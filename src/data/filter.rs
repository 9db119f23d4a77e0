use std::collections::HashSet;

use log::debug;

use super::model::{CellValue, Dataset, NumericRange, Record};
use crate::config::ColumnNames;
use crate::error::MissingColumnError;

// ---------------------------------------------------------------------------
// Filter predicate: one constraint per dimension
// ---------------------------------------------------------------------------

/// Constraint over a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RangeFilter {
    /// No constraint.
    #[default]
    Any,
    /// Value must lie within the inclusive range.
    Inclusive(NumericRange),
    /// Requested range does not overlap the data: matches nothing.
    Empty,
}

impl RangeFilter {
    fn accepts(&self, value: &CellValue) -> bool {
        match self {
            RangeFilter::Any => true,
            RangeFilter::Inclusive(range) => value.as_f64().is_some_and(|v| range.contains(v)),
            RangeFilter::Empty => false,
        }
    }

    fn is_active(&self) -> bool {
        !matches!(self, RangeFilter::Any)
    }
}

/// Active constraints for a single query.
/// The default value has no constraint in any dimension and matches every row.
///
/// Range constraints can only be set through [`FilterSpecBuilder`], which
/// clamps them to the data they will run against.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    pub columns: ColumnNames,
    pub team: Option<CellValue>,
    pub league: Option<CellValue>,
    age: RangeFilter,
    matches: RangeFilter,
}

impl FilterSpec {
    /// Start an unconstrained spec whose ranges, once set, are bound to the
    /// dataset's observed extents.
    pub fn builder(
        dataset: &Dataset,
        columns: &ColumnNames,
    ) -> Result<FilterSpecBuilder, MissingColumnError> {
        Ok(FilterSpecBuilder {
            spec: FilterSpec {
                columns: columns.clone(),
                ..FilterSpec::default()
            },
            age_extent: dataset.column_extent(&columns.age)?,
            matches_extent: dataset.column_extent(&columns.matches)?,
        })
    }

    pub fn age(&self) -> RangeFilter {
        self.age
    }

    pub fn matches(&self) -> RangeFilter {
        self.matches
    }

    fn accepts(&self, rec: &Record) -> bool {
        if let Some(team) = &self.team {
            if rec.get(&self.columns.team) != team {
                return false;
            }
        }
        if let Some(league) = &self.league {
            if rec.get(&self.columns.league) != league {
                return false;
            }
        }
        self.age.accepts(rec.get(&self.columns.age))
            && self.matches.accepts(rec.get(&self.columns.matches))
    }

    fn validate(&self, dataset: &Dataset) -> Result<(), MissingColumnError> {
        dataset.require_column(&self.columns.team)?;
        dataset.require_column(&self.columns.age)?;
        dataset.require_column(&self.columns.matches)?;
        if self.league.is_some() {
            dataset.require_column(&self.columns.league)?;
        }
        Ok(())
    }

    /// Whether any dimension is constrained.
    pub fn is_active(&self) -> bool {
        self.team.is_some()
            || self.league.is_some()
            || self.age.is_active()
            || self.matches.is_active()
    }
}

/// Builds a [`FilterSpec`] whose ranges are clamped to the observed data.
#[derive(Debug, Clone)]
pub struct FilterSpecBuilder {
    spec: FilterSpec,
    age_extent: Option<NumericRange>,
    matches_extent: Option<NumericRange>,
}

impl FilterSpecBuilder {
    pub fn team(mut self, team: impl Into<CellValue>) -> Self {
        self.spec.team = Some(team.into());
        self
    }

    pub fn league(mut self, league: impl Into<CellValue>) -> Self {
        self.spec.league = Some(league.into());
        self
    }

    pub fn age_range(mut self, lo: f64, hi: f64) -> Self {
        self.spec.age = clamp(NumericRange::new(lo, hi), self.age_extent);
        self
    }

    pub fn matches_range(mut self, lo: f64, hi: f64) -> Self {
        self.spec.matches = clamp(NumericRange::new(lo, hi), self.matches_extent);
        self
    }

    pub fn build(self) -> FilterSpec {
        self.spec
    }
}

fn clamp(requested: NumericRange, extent: Option<NumericRange>) -> RangeFilter {
    match extent {
        // No numeric cell anywhere: nothing can satisfy a range.
        None => RangeFilter::Empty,
        Some(extent) => requested
            .intersect(&extent)
            .map_or(RangeFilter::Empty, RangeFilter::Inclusive),
    }
}

// ---------------------------------------------------------------------------
// Engine operations
// ---------------------------------------------------------------------------

/// Return indices of records that pass every active constraint.
pub fn filtered_indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| spec.accepts(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Rows matching the conjunction of `spec`'s constraints, in source order.
///
/// Team, age and matches-played columns must exist even when unconstrained;
/// the league column only when a league is selected.
pub fn apply_filter(dataset: &Dataset, spec: &FilterSpec) -> Result<Dataset, MissingColumnError> {
    spec.validate(dataset)?;
    if !spec.is_active() {
        return Ok(dataset.clone());
    }
    let indices = filtered_indices(dataset, spec);
    debug!("Filter kept {} of {} rows", indices.len(), dataset.len());
    Ok(dataset.select(&indices))
}

/// Every row whose `group_column` equals `group`, ignoring all other filters.
/// A missing column simply matches no row.
pub fn all_rows_for_group(dataset: &Dataset, group_column: &str, group: &CellValue) -> Dataset {
    let indices: Vec<usize> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.get(group_column) == group)
        .map(|(i, _)| i)
        .collect();
    dataset.select(&indices)
}

/// Unique values of `column` in first-occurrence order.
pub fn distinct_values(
    dataset: &Dataset,
    column: &str,
) -> Result<Vec<CellValue>, MissingColumnError> {
    dataset.require_column(column)?;
    let mut seen: HashSet<&CellValue> = HashSet::new();
    let mut values = Vec::new();
    for rec in &dataset.records {
        let value = rec.get(column);
        if seen.insert(value) {
            values.push(value.clone());
        }
    }
    Ok(values)
}
