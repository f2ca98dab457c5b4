//! Aggregations feeding the dashboard.
//!
//! Every function here is a pure single pass over borrowed rows; nothing keeps
//! state between calls.

pub mod dummy;
pub mod frequency;
pub mod runtime;
pub mod share;
pub mod yearly;

pub use dummy::{DummyEncoder, DummyTable};
pub use frequency::{FrequencyEntry, FrequencyTable, top_n};
pub use runtime::{RuntimeBucket, bucket_runtime, bucket_runtimes};
pub use share::{LabelStyle, ShareAggregator, ShareRecord};
pub use yearly::{SharePrecision, YearGenreRecord, YearlyGenreProfiler};

/// Number of main genres profiled per year.
pub const MAIN_GENRE_COUNT: usize = 8;
/// Number of top categories used as the dummy "other" reference list.
pub const TOP_CATEGORY_COUNT: usize = 10;
