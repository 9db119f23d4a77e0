//! Data layer: core types, loading, filtering, and ranking.
//!
//! Architecture:
//! ```text
//!  .parquet / .json / .csv / .xlsx
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  source   │  first existing path, loaded once per session
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  column names + Vec<Record>, read-only after load
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterSpec predicates → filtered view
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  rank     │  top-N by metric, per-player metric totals
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod rank;
pub mod source;
