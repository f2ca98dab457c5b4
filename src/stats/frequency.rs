use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::dataset::{CategoryField, Row};

/// Occurrence count of a single category key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub key: String,
    pub count: usize,
}

/// カテゴリの出現回数表。
///
/// 出現回数の降順に並び、同数の場合は最初に出現した順序を保つ
/// （キーのソートではなく安定ソートによるタイブレーク）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Counts every key yielded by `accessor` across `rows`.
    pub fn count<'a, F, I>(rows: &'a [Row], accessor: F) -> Self
    where
        F: Fn(&'a Row) -> I,
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_keys(rows.iter().flat_map(accessor))
    }

    #[must_use]
    pub fn from_field(rows: &[Row], field: CategoryField) -> Self {
        Self::count(rows, |row| row.categories(field).iter())
    }

    pub fn from_keys<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions: FxHashMap<&'a str, usize> = FxHashMap::default();
        let mut counted: Vec<(&'a str, usize)> = Vec::new();

        for key in keys {
            if let Some(&position) = positions.get(key) {
                counted[position].1 += 1;
            } else {
                positions.insert(key, counted.len());
                counted.push((key, 1));
            }
        }

        // sort_by is stable: equal counts keep first-encounter order
        counted.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            entries: counted
                .into_iter()
                .map(|(key, count)| FrequencyEntry {
                    key: key.to_string(),
                    count,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of extracted occurrences.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.count)
    }

    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<String> {
        top_n(self, n)
    }
}

/// Keys of the first `n` entries; fewer when the table is shorter.
#[must_use]
pub fn top_n(table: &FrequencyTable, n: usize) -> Vec<String> {
    table
        .entries
        .iter()
        .take(n)
        .map(|entry| entry.key.clone())
        .collect()
}
