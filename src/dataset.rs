//! Input contract for the statistics core.
//!
//! The dashboard hands over an in-memory table of titles; the core only reads
//! it. Loading rows from JSON lives here too so that missing columns are
//! rejected before any aggregation runs.

mod loader;
mod row;

pub use loader::{load_rows, load_rows_from_path, partition_by_kind, rows_from_json};
pub use row::{Categories, CategoryField, Row, TitleKind};
