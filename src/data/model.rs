use std::collections::BTreeMap;
use std::fmt;

use crate::error::MissingColumnError;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a player table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a spreadsheet column infers to.
/// Must be `Ord` + `Hash` so values can key selection lists and badge lookups.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord/Hash so CellValue can live in sets and maps --
//
// Floats compare by `total_cmp` after folding every NaN into one value and
// `-0.0` into `0.0`; equality and hashing both go through the same key.

fn canonical(v: f64) -> f64 {
    if v.is_nan() {
        f64::NAN
    } else if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => canonical(*f).to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl CellValue {
    /// Numeric view of the cell; strings, bools and nulls are non-numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

static NULL: CellValue = CellValue::Null;

// ---------------------------------------------------------------------------
// Record – one row of the player table
// ---------------------------------------------------------------------------

/// A single row: column name → value. Absent columns read as [`CellValue::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.values.insert(column.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.values.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&NULL)
    }
}

// ---------------------------------------------------------------------------
// NumericRange – inclusive bounds over a numeric column
// ---------------------------------------------------------------------------

/// Inclusive numeric interval with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    min: f64,
    max: f64,
}

impl NumericRange {
    /// Build a range from two bounds in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Overlap of two ranges, `None` when they are disjoint.
    pub fn intersect(&self, other: &NumericRange) -> Option<NumericRange> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(NumericRange { min, max })
    }
}

// ---------------------------------------------------------------------------
// Dataset – an ordered table of records
// ---------------------------------------------------------------------------

/// The loaded table, or a view derived from it. Views keep the parent's
/// column set so column checks behave the same on empty results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Column names in source order.
    pub column_names: Vec<String>,
    /// All rows, in source order.
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(column_names: Vec<String>, records: Vec<Record>) -> Self {
        Dataset {
            column_names,
            records,
        }
    }

    /// Build from records alone, taking columns in first-seen order.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut column_names: Vec<String> = Vec::new();
        for rec in &records {
            for col in rec.values.keys() {
                if !column_names.iter().any(|c| c == col) {
                    column_names.push(col.clone());
                }
            }
        }
        Dataset {
            column_names,
            records,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    pub fn require_column(&self, column: &str) -> Result<(), MissingColumnError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(MissingColumnError::new(column))
        }
    }

    /// Observed min/max of the numeric cells in `column`.
    /// `Ok(None)` when the column exists but holds no numeric cell.
    pub fn column_extent(&self, column: &str) -> Result<Option<NumericRange>, MissingColumnError> {
        self.require_column(column)?;
        let extent = self
            .records
            .iter()
            .filter_map(|r| r.get(column).as_f64())
            .fold(None, |acc: Option<NumericRange>, v| match acc {
                None => Some(NumericRange::new(v, v)),
                Some(r) => Some(NumericRange::new(r.min.min(v), r.max.max(v))),
            });
        Ok(extent)
    }

    /// New view holding the rows at `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            column_names: self.column_names.clone(),
            records: indices
                .iter()
                .filter_map(|&i| self.records.get(i).cloned())
                .collect(),
        }
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Dataset {
        Dataset {
            column_names: self.column_names.clone(),
            records: self.records.iter().take(n).cloned().collect(),
        }
    }

    /// Rows of `self` followed by rows of `other`; columns are the union,
    /// `self`'s order first.
    pub fn concat(&self, other: &Dataset) -> Dataset {
        let mut column_names = self.column_names.clone();
        for col in &other.column_names {
            if !column_names.contains(col) {
                column_names.push(col.clone());
            }
        }
        let records = self
            .records
            .iter()
            .chain(other.records.iter())
            .cloned()
            .collect();
        Dataset {
            column_names,
            records,
        }
    }
}
