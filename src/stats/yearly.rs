use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::frequency::FrequencyTable;
use crate::dataset::Row;
use crate::error::StatsError;
use crate::util::rounding::round_to;

/// Key under which the year is stored in a [`YearGenreRecord`].
pub const YEAR_KEY: &str = "year";

/// Rounding contract of a yearly profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePrecision {
    /// Shares rounded to the given number of decimals.
    Rounded(u32),
    /// Raw `count / total` ratios.
    Unrounded,
}

impl SharePrecision {
    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Rounded(digits) => round_to(value, digits),
            Self::Unrounded => value,
        }
    }
}

/// Genre shares of a single release year.
///
/// Serialises as a flat object: one entry per main genre followed by
/// `"year": "<year>"`.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGenreRecord {
    pub year: String,
    shares: Vec<(String, f64)>,
}

impl YearGenreRecord {
    /// Share of `genre`, `None` when it is not a main genre.
    #[must_use]
    pub fn get(&self, genre: &str) -> Option<f64> {
        self.shares
            .iter()
            .find(|(key, _)| key == genre)
            .map(|(_, share)| *share)
    }

    /// Shares in main-genre order.
    #[must_use]
    pub fn shares(&self) -> &[(String, f64)] {
        &self.shares
    }
}

impl Serialize for YearGenreRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shares.len() + 1))?;
        for (genre, share) in &self.shares {
            map.serialize_entry(genre, share)?;
        }
        map.serialize_entry(YEAR_KEY, &self.year)?;
        map.end()
    }
}

/// 年ごとの主要ジャンル構成比を算出する。
///
/// 主要ジャンル集合は構築時に固定され、年ごとに再計算しない。集合外のジャンルは
/// "Other" にまとめず単に捨てる。該当ジャンルが1件もない年は全ジャンル 0.0 となる。
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyGenreProfiler {
    main_genres: Vec<String>,
    precision: SharePrecision,
}

impl YearlyGenreProfiler {
    /// # Errors
    /// [`StatsError::ReservedKey`] when a main genre is literally `"year"`.
    pub fn new(main_genres: Vec<String>, precision: SharePrecision) -> Result<Self, StatsError> {
        let mut seen = FxHashSet::default();
        let mut unique = Vec::with_capacity(main_genres.len());
        for genre in main_genres {
            if genre == YEAR_KEY {
                return Err(StatsError::ReservedKey { key: genre });
            }
            if seen.insert(genre.clone()) {
                unique.push(genre);
            }
        }
        Ok(Self {
            main_genres: unique,
            precision,
        })
    }

    /// Profile with shares rounded to `digits` decimals (movie dashboard).
    ///
    /// # Errors
    /// See [`YearlyGenreProfiler::new`].
    pub fn rounded(main_genres: Vec<String>, digits: u32) -> Result<Self, StatsError> {
        Self::new(main_genres, SharePrecision::Rounded(digits))
    }

    /// Profile with raw ratios (show dashboard).
    ///
    /// # Errors
    /// See [`YearlyGenreProfiler::new`].
    pub fn unrounded(main_genres: Vec<String>) -> Result<Self, StatsError> {
        Self::new(main_genres, SharePrecision::Unrounded)
    }

    #[must_use]
    pub fn main_genres(&self) -> &[String] {
        &self.main_genres
    }

    #[must_use]
    pub fn precision(&self) -> SharePrecision {
        self.precision
    }

    /// One record per distinct `release_year`, ascending.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn profile(&self, rows: &[Row]) -> Vec<YearGenreRecord> {
        let main: FxHashSet<&str> = self.main_genres.iter().map(String::as_str).collect();

        let mut by_year: BTreeMap<i32, Vec<&Row>> = BTreeMap::new();
        for row in rows {
            by_year.entry(row.release_year).or_default().push(row);
        }

        let records: Vec<YearGenreRecord> = by_year
            .into_iter()
            .map(|(year, year_rows)| {
                let counts = FrequencyTable::from_keys(
                    year_rows
                        .iter()
                        .flat_map(|row| row.genres.iter())
                        .filter(|genre| main.contains(genre)),
                );
                let total = counts.total();

                let shares = self
                    .main_genres
                    .iter()
                    .map(|genre| {
                        let share = match counts.get(genre) {
                            Some(count) if total > 0 => {
                                self.precision.apply(count as f64 / total as f64)
                            }
                            _ => 0.0,
                        };
                        (genre.clone(), share)
                    })
                    .collect();

                YearGenreRecord {
                    year: year.to_string(),
                    shares,
                }
            })
            .collect();

        debug!(
            years = records.len(),
            main_genres = self.main_genres.len(),
            "profiled genres per year"
        );
        records
    }
}
