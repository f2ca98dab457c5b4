//! Runtime bucketing in 30 minute steps.
//!
//! Intervals are left-open and right-closed. Values outside `(0, 180]`,
//! including zero and negatives, land in the catch-all bucket.
//!
//! `(150, 180]` reports the same label as `(120, 150]`, the dashboard legend
//! only knows six labels.
// TODO: emit a dedicated "150_180" label once the dashboard legend has one.

use serde::{Serialize, Serializer};

use crate::dataset::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeBucket {
    UpTo30,
    UpTo60,
    UpTo90,
    UpTo120,
    UpTo150,
    UpTo180,
    CatchAll,
}

impl RuntimeBucket {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::UpTo30 => "0_30",
            Self::UpTo60 => "30_60",
            Self::UpTo90 => "60_90",
            Self::UpTo120 => "90_120",
            Self::UpTo150 | Self::UpTo180 => "120_150",
            Self::CatchAll => ">=180",
        }
    }
}

impl Serialize for RuntimeBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Maps a runtime in minutes to its bucket. `NaN` goes to the catch-all.
#[must_use]
pub fn bucket_runtime(minutes: f64) -> RuntimeBucket {
    const BOUNDS: [(f64, f64, RuntimeBucket); 6] = [
        (0.0, 30.0, RuntimeBucket::UpTo30),
        (30.0, 60.0, RuntimeBucket::UpTo60),
        (60.0, 90.0, RuntimeBucket::UpTo90),
        (90.0, 120.0, RuntimeBucket::UpTo120),
        (120.0, 150.0, RuntimeBucket::UpTo150),
        (150.0, 180.0, RuntimeBucket::UpTo180),
    ];

    BOUNDS
        .iter()
        .find(|(low, high, _)| minutes > *low && minutes <= *high)
        .map_or(RuntimeBucket::CatchAll, |(_, _, bucket)| *bucket)
}

/// Bucket of every row, aligned with row order.
#[must_use]
pub fn bucket_runtimes(rows: &[Row]) -> Vec<RuntimeBucket> {
    rows.iter().map(|row| bucket_runtime(row.runtime)).collect()
}
