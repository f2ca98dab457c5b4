use rustc_hash::FxHashSet;

use serde::{Deserialize, Serialize};

/// 1行に含まれる多値カテゴリ（ジャンルや制作国コード）。
///
/// 元データの並び順を保持し、メンバーシップ判定は完全一致で行う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Categories(Vec<String>);

impl Categories {
    #[must_use]
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|value| value == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true when at least one value is not part of `known`.
    #[must_use]
    pub fn any_outside(&self, known: &FxHashSet<&str>) -> bool {
        self.iter().any(|value| !known.contains(value))
    }
}

impl<S: Into<String>> FromIterator<S> for Categories {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Movie or show. Rows without an explicit kind are treated as movies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    #[default]
    #[serde(alias = "MOVIE")]
    Movie,
    #[serde(alias = "SHOW")]
    Show,
}

/// A single title of the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub genres: Categories,
    pub production_countries: Categories,
    pub release_year: i32,
    pub runtime: f64,
    pub kind: TitleKind,
}

impl Row {
    #[must_use]
    pub fn new<G, C>(genres: G, production_countries: C, release_year: i32, runtime: f64) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            genres: genres.into_iter().collect(),
            production_countries: production_countries.into_iter().collect(),
            release_year,
            runtime,
            kind: TitleKind::Movie,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: TitleKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn categories(&self, field: CategoryField) -> &Categories {
        match field {
            CategoryField::Genres => &self.genres,
            CategoryField::ProductionCountries => &self.production_countries,
        }
    }
}

/// Multi-valued columns that the counters and encoders can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Genres,
    ProductionCountries,
}

impl CategoryField {
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Genres => "genres",
            Self::ProductionCountries => "production_countries",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact_match() {
        let genres: Categories = ["drama", "scifi"].into_iter().collect();

        assert!(genres.contains("drama"));
        assert!(!genres.contains("Drama"));
        assert!(!genres.contains("sci"));
    }

    #[test]
    fn any_outside_detects_unknown_values() {
        let genres: Categories = ["drama", "obscure"].into_iter().collect();
        let known: FxHashSet<&str> = ["drama", "comedy"].into_iter().collect();
        let wide: FxHashSet<&str> = ["drama", "obscure"].into_iter().collect();

        assert!(genres.any_outside(&known));
        assert!(!genres.any_outside(&wide));
        assert!(!Categories::default().any_outside(&known));
    }

    #[test]
    fn categories_accessor_follows_field() {
        let row = Row::new(["comedy"], ["US", "GB"], 2001, 95.0);

        assert_eq!(row.categories(CategoryField::Genres).len(), 1);
        assert_eq!(row.categories(CategoryField::ProductionCountries).len(), 2);
        assert_eq!(row.kind, TitleKind::Movie);
    }
}
