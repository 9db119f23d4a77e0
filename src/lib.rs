pub mod badges;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod pages;
pub mod state;
pub mod table;

pub use data::filter::{all_rows_for_group, apply_filter, distinct_values, FilterSpec, RangeFilter};
pub use data::model::{CellValue, Dataset, NumericRange, Record};
pub use data::rank::{rank_by, summarize_entity, EntitySummary};
pub use error::{LoadError, MissingColumnError};
