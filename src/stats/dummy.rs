use rustc_hash::FxHashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::dataset::{CategoryField, Row};

/// Prefix of every indicator column label.
pub const DUMMY_PREFIX: &str = "dummy_";

/// Fixed genre vocabulary of the genre indicator columns.
pub const GENRE_DUMMY_VOCABULARY: [&str; 10] = [
    "drama", "comedy", "thriller", "action", "romance", "crime", "family", "fantasy", "european",
    "scifi",
];

/// Fixed country vocabulary of the country indicator columns.
pub const COUNTRY_DUMMY_VOCABULARY: [&str; 10] =
    ["US", "GB", "IN", "CA", "FR", "DE", "JP", "ES", "IT", "AU"];

/// Column-oriented 0/1 indicators, every column aligned with the input rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DummyTable {
    columns: Vec<(String, Vec<u8>)>,
    rows: usize,
}

impl DummyTable {
    #[must_use]
    pub fn column(&self, label: &str) -> Option<&[u8]> {
        self.columns
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, values)| values.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn columns(&self) -> &[(String, Vec<u8>)] {
        &self.columns
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows
    }
}

impl Serialize for DummyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (label, values) in &self.columns {
            map.serialize_entry(label, values)?;
        }
        map.end()
    }
}

/// 固定語彙に対するダミー変数（one-hot）列を生成する。
///
/// `vocabulary` は列として展開する固定語彙、`other_reference` は "other" 判定に
/// 使う呼び出し側の上位リスト。両者は独立したパラメータであり、一致している
/// 必要はない。行のカテゴリに `other_reference` 外の値が1つでもあれば
/// "other" 列が 1 になる（`vocabulary` は判定に使わない）。
#[derive(Debug, Clone, PartialEq)]
pub struct DummyEncoder {
    field: CategoryField,
    vocabulary: Vec<String>,
    other_reference: Vec<String>,
    other_label: String,
}

impl DummyEncoder {
    pub fn new<V, R>(
        field: CategoryField,
        vocabulary: V,
        other_reference: R,
        other_label: impl Into<String>,
    ) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let mut seen = FxHashSet::default();
        let vocabulary = vocabulary
            .into_iter()
            .map(Into::into)
            .filter(|key: &String| seen.insert(key.clone()))
            .collect();

        Self {
            field,
            vocabulary,
            other_reference: other_reference.into_iter().map(Into::into).collect(),
            other_label: other_label.into(),
        }
    }

    /// Genre indicators over [`GENRE_DUMMY_VOCABULARY`]; `top_genres` drives
    /// the `dummy_OTHER_genres` column.
    #[must_use]
    pub fn genres(top_genres: Vec<String>) -> Self {
        Self::new(
            CategoryField::Genres,
            GENRE_DUMMY_VOCABULARY,
            top_genres,
            format!("{DUMMY_PREFIX}OTHER_genres"),
        )
    }

    /// Country indicators over [`COUNTRY_DUMMY_VOCABULARY`]; `top_countries`
    /// drives the `dummy_OTHER_countries` column.
    #[must_use]
    pub fn countries(top_countries: Vec<String>) -> Self {
        Self::new(
            CategoryField::ProductionCountries,
            COUNTRY_DUMMY_VOCABULARY,
            top_countries,
            format!("{DUMMY_PREFIX}OTHER_countries"),
        )
    }

    /// Replaces the iterated vocabulary, keeping the "other" reference list.
    #[must_use]
    pub fn with_vocabulary<V>(self, vocabulary: V) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self::new(
            self.field,
            vocabulary,
            self.other_reference,
            self.other_label,
        )
    }

    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    #[must_use]
    pub fn other_reference(&self) -> &[String] {
        &self.other_reference
    }

    #[must_use]
    pub fn other_label(&self) -> &str {
        &self.other_label
    }

    /// One column per vocabulary key (`dummy_<key>`, vocabulary order) plus the
    /// trailing "other" column.
    #[must_use]
    pub fn encode(&self, rows: &[Row]) -> DummyTable {
        let reference: FxHashSet<&str> = self.other_reference.iter().map(String::as_str).collect();

        let mut columns: Vec<(String, Vec<u8>)> = self
            .vocabulary
            .iter()
            .map(|key| (format!("{DUMMY_PREFIX}{key}"), Vec::with_capacity(rows.len())))
            .collect();
        let mut other = Vec::with_capacity(rows.len());

        for row in rows {
            let categories = row.categories(self.field);
            for (key, (_, values)) in self.vocabulary.iter().zip(columns.iter_mut()) {
                values.push(u8::from(categories.contains(key)));
            }
            other.push(u8::from(categories.any_outside(&reference)));
        }

        columns.push((self.other_label.clone(), other));

        debug!(
            field = self.field.column_name(),
            rows = rows.len(),
            columns = columns.len(),
            "encoded dummy columns"
        );
        DummyTable {
            columns,
            rows: rows.len(),
        }
    }
}
