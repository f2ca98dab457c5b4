use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::frequency::FrequencyTable;
use crate::error::StatsError;
use crate::util::rounding::round_to;

/// Label of the trailing long-tail bucket.
pub const OTHER_LABEL: &str = "Other";

/// Minimum share for genres to get their own slice.
pub const GENRE_MIN_SHARE: f64 = 0.03;
/// Minimum share for production countries to get their own slice.
pub const COUNTRY_MIN_SHARE: f64 = 0.02;
/// Decimal places kept on every share.
pub const DEFAULT_PRECISION: u32 = 2;
/// Output key of the label when no preset names it.
pub const DEFAULT_RECORD_FIELD: &str = "category";

/// How a category key is rendered in the emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    Raw,
    /// First character upper-cased, the rest lower-cased (`"sci-FI"` → `"Sci-fi"`).
    Capitalized,
}

impl LabelStyle {
    #[must_use]
    pub fn render(self, key: &str) -> String {
        match self {
            Self::Raw => key.to_string(),
            Self::Capitalized => {
                let mut chars = key.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// One slice of a share distribution.
///
/// Serialises as `{<field>: <category>, "value": <value>}`, e.g.
/// `{"genre": "Drama", "value": 0.6}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRecord {
    pub field: &'static str,
    pub category: String,
    pub value: f64,
}

impl Serialize for ShareRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.field, &self.category)?;
        map.serialize_entry("value", &self.value)?;
        map.end()
    }
}

/// 出現回数を構成比に変換し、閾値未満のキーを "Other" にまとめる。
///
/// 各キーの構成比は先に丸めてから "Other" に加算する。そのため "Other" の値は
/// 丸め誤差を累積したものになる（意図した挙動）。
#[derive(Debug, Clone, PartialEq)]
pub struct ShareAggregator {
    min_share: f64,
    label_style: LabelStyle,
    precision: u32,
    record_field: &'static str,
    context: &'static str,
}

impl ShareAggregator {
    #[must_use]
    pub fn new(min_share: f64) -> Self {
        Self {
            min_share,
            label_style: LabelStyle::Raw,
            precision: DEFAULT_PRECISION,
            record_field: DEFAULT_RECORD_FIELD,
            context: "category shares",
        }
    }

    /// Genre distribution preset: 3% threshold, capitalised labels under `genre`.
    #[must_use]
    pub fn genres() -> Self {
        Self::new(GENRE_MIN_SHARE)
            .with_label_style(LabelStyle::Capitalized)
            .with_record_field("genre")
            .with_context("genre shares")
    }

    /// Country distribution preset: 2% threshold, raw ISO codes under `country`.
    #[must_use]
    pub fn countries() -> Self {
        Self::new(COUNTRY_MIN_SHARE)
            .with_record_field("country")
            .with_context("country shares")
    }

    #[must_use]
    pub fn with_min_share(mut self, min_share: f64) -> Self {
        self.min_share = min_share;
        self
    }

    #[must_use]
    pub fn with_label_style(mut self, label_style: LabelStyle) -> Self {
        self.label_style = label_style;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Output key under which the label is serialised.
    #[must_use]
    pub fn with_record_field(mut self, record_field: &'static str) -> Self {
        self.record_field = record_field;
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: &'static str) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn min_share(&self) -> f64 {
        self.min_share
    }

    /// Converts `table` into share records followed by a trailing `Other`
    /// record, which is emitted even when nothing was folded into it.
    ///
    /// Records keep the table's order (count descending).
    ///
    /// # Errors
    /// [`StatsError::EmptyInput`] when the table holds no occurrences.
    #[allow(clippy::cast_precision_loss)]
    pub fn aggregate(&self, table: &FrequencyTable) -> Result<Vec<ShareRecord>, StatsError> {
        let total = table.total();
        if total == 0 {
            return Err(StatsError::EmptyInput {
                context: self.context,
            });
        }

        let mut records = Vec::with_capacity(table.len() + 1);
        let mut other = 0.0;
        let mut folded = 0usize;

        for entry in table.iter() {
            let share = round_to(entry.count as f64 / total as f64, self.precision);
            if share < self.min_share {
                other += share;
                folded += 1;
            } else {
                records.push(ShareRecord {
                    field: self.record_field,
                    category: self.label_style.render(&entry.key),
                    value: share,
                });
            }
        }

        records.push(ShareRecord {
            field: self.record_field,
            category: OTHER_LABEL.to_string(),
            value: round_to(other, self.precision),
        });

        debug!(
            context = self.context,
            total,
            kept = records.len() - 1,
            folded,
            "computed share distribution"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(counts: &[(&'static str, usize)]) -> FrequencyTable {
        FrequencyTable::from_keys(
            counts
                .iter()
                .flat_map(|(key, count)| std::iter::repeat_n(*key, *count)),
        )
    }

    #[test]
    fn folds_small_keys_into_other() {
        // 100 occurrences: drama 60, comedy 37, horror 2, war 1
        let input = table(&[("drama", 60), ("comedy", 37), ("horror", 2), ("war", 1)]);

        let records = ShareAggregator::genres()
            .aggregate(&input)
            .expect("non-empty input");

        assert_eq!(
            records,
            vec![
                ShareRecord {
                    field: "genre",
                    category: "Drama".into(),
                    value: 0.6
                },
                ShareRecord {
                    field: "genre",
                    category: "Comedy".into(),
                    value: 0.37
                },
                ShareRecord {
                    field: "genre",
                    category: "Other".into(),
                    value: 0.03
                },
            ]
        );
    }

    #[test]
    fn other_is_always_emitted() {
        let input = table(&[("US", 3), ("GB", 1)]);

        let records = ShareAggregator::countries()
            .aggregate(&input)
            .expect("non-empty input");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].category, "US");
        assert_eq!(records[2].category, OTHER_LABEL);
        assert!(records[2].value.abs() < f64::EPSILON);
    }

    #[test]
    fn other_sums_rounded_shares() {
        // each of 7 keys has share 1/300 -> rounds to 0.0, so Other stays 0.0
        // although the raw remainder is 7/300 ≈ 0.02
        let mut counts = vec![("main", 293)];
        counts.extend(["a", "b", "c", "d", "e", "f", "g"].map(|key| (key, 1)));
        let input = table(&counts);

        let records = ShareAggregator::new(0.03)
            .aggregate(&input)
            .expect("non-empty input");

        assert_eq!(records.len(), 2);
        assert!((records[0].value - 0.98).abs() < f64::EPSILON);
        assert!(records[1].value.abs() < f64::EPSILON);
    }

    #[test]
    fn share_equal_to_threshold_is_kept() {
        let input = table(&[("big", 97), ("edge", 3)]);

        let records = ShareAggregator::new(0.03)
            .aggregate(&input)
            .expect("non-empty input");

        assert_eq!(records[1].category, "edge");
        assert!((records[1].value - 0.03).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_table_is_an_error() {
        let error = ShareAggregator::genres()
            .aggregate(&FrequencyTable::default())
            .expect_err("empty input must not divide by zero");

        assert!(matches!(
            error,
            StatsError::EmptyInput {
                context: "genre shares"
            }
        ));
    }

    #[test]
    fn presets_name_the_output_field() {
        let input = table(&[("drama", 1)]);

        let genres = ShareAggregator::genres()
            .aggregate(&input)
            .expect("non-empty input");
        let countries = ShareAggregator::countries()
            .aggregate(&input)
            .expect("non-empty input");
        let plain = ShareAggregator::new(0.5)
            .aggregate(&input)
            .expect("non-empty input");

        assert_eq!(
            serde_json::to_value(&genres).expect("serialisable"),
            serde_json::json!([
                {"genre": "Drama", "value": 1.0},
                {"genre": "Other", "value": 0.0}
            ])
        );
        assert_eq!(
            serde_json::to_value(&countries[0]).expect("serialisable"),
            serde_json::json!({"country": "drama", "value": 1.0})
        );
        assert_eq!(
            serde_json::to_value(&plain[0]).expect("serialisable"),
            serde_json::json!({"category": "drama", "value": 1.0})
        );
    }

    #[test]
    fn capitalize_lowercases_the_rest() {
        assert_eq!(LabelStyle::Capitalized.render("sci-FI"), "Sci-fi");
        assert_eq!(LabelStyle::Capitalized.render(""), "");
        assert_eq!(LabelStyle::Raw.render("sci-FI"), "sci-FI");
    }
}
