//! Assembles every dashboard aggregate from the movie and show tables.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::dataset::{CategoryField, Row};
use crate::error::StatsError;
use crate::platform::{Platform, PlatformBranding};
use crate::stats::{
    DummyEncoder, DummyTable, FrequencyTable, RuntimeBucket, ShareAggregator, ShareRecord,
    YearGenreRecord, YearlyGenreProfiler, bucket_runtimes,
};

/// Most frequent genres of movies and of shows, counted independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MainGenres {
    pub movies: Vec<String>,
    pub shows: Vec<String>,
}

/// Top-`n` genres of each table.
#[must_use]
pub fn main_genres(movies: &[Row], shows: &[Row], n: usize) -> MainGenres {
    MainGenres {
        movies: FrequencyTable::from_field(movies, CategoryField::Genres).top_n(n),
        shows: FrequencyTable::from_field(shows, CategoryField::Genres).top_n(n),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformBranding>,
    pub main_genres: MainGenres,
    pub movie_genres_by_year: Vec<YearGenreRecord>,
    pub show_genres_by_year: Vec<YearGenreRecord>,
    pub genre_shares: Vec<ShareRecord>,
    pub country_shares: Vec<ShareRecord>,
    pub runtime_groups: Vec<RuntimeBucket>,
    pub top_genres: Vec<String>,
    pub top_countries: Vec<String>,
    pub genre_dummies: DummyTable,
    pub country_dummies: DummyTable,
}

/// ダッシュボード用レポートを組み立てる。
///
/// 呼び出し箇所ごとのパラメータ（閾値、丸め方、ラベル表記、語彙）は
/// [`Config`] から決まる。
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    config: Config,
    platform: Option<Platform>,
}

impl ReportBuilder {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            platform: None,
        }
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Option<Platform>) -> Self {
        self.platform = platform;
        self
    }

    /// Movies feed the share, runtime and dummy sections; shows only feed
    /// their own main genres and yearly profile.
    ///
    /// # Errors
    /// [`StatsError::ReservedKey`] when a main genre is named `year`. Empty
    /// share inputs do not fail the report; their section is left empty.
    #[tracing::instrument(skip_all, fields(movies = movies.len(), shows = shows.len()))]
    pub fn build(&self, movies: &[Row], shows: &[Row]) -> Result<DashboardReport, StatsError> {
        let precision = self.config.share_precision();
        let main_genres = main_genres(movies, shows, self.config.main_genre_count());

        let movie_genres_by_year =
            YearlyGenreProfiler::rounded(main_genres.movies.clone(), precision)?.profile(movies);
        let show_genres_by_year =
            YearlyGenreProfiler::unrounded(main_genres.shows.clone())?.profile(shows);

        let genre_table = FrequencyTable::from_field(movies, CategoryField::Genres);
        let country_table = FrequencyTable::from_field(movies, CategoryField::ProductionCountries);

        let genre_shares = shares_or_empty(
            ShareAggregator::genres()
                .with_min_share(self.config.genre_min_share())
                .with_precision(precision)
                .aggregate(&genre_table),
        )?;
        let country_shares = shares_or_empty(
            ShareAggregator::countries()
                .with_min_share(self.config.country_min_share())
                .with_precision(precision)
                .aggregate(&country_table),
        )?;

        let top_genres = genre_table.top_n(self.config.top_category_count());
        let top_countries = country_table.top_n(self.config.top_category_count());

        let genre_dummies = DummyEncoder::genres(top_genres.clone())
            .with_vocabulary(self.config.genre_dummy_vocabulary().iter().cloned())
            .encode(movies);
        let country_dummies = DummyEncoder::countries(top_countries.clone())
            .with_vocabulary(self.config.country_dummy_vocabulary().iter().cloned())
            .encode(movies);

        let report = DashboardReport {
            platform: self.platform.map(Platform::branding),
            main_genres,
            movie_genres_by_year,
            show_genres_by_year,
            genre_shares,
            country_shares,
            runtime_groups: bucket_runtimes(movies),
            top_genres,
            top_countries,
            genre_dummies,
            country_dummies,
        };

        info!(
            movie_years = report.movie_genres_by_year.len(),
            show_years = report.show_genres_by_year.len(),
            genre_slices = report.genre_shares.len(),
            country_slices = report.country_shares.len(),
            "dashboard report built"
        );
        Ok(report)
    }
}

fn shares_or_empty(
    result: Result<Vec<ShareRecord>, StatsError>,
) -> Result<Vec<ShareRecord>, StatsError> {
    match result {
        Err(error) if error.is_empty_input() => {
            warn!(error = %error, "share section left empty");
            Ok(Vec::new())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TitleKind;

    #[test]
    fn main_genres_counts_tables_independently() {
        let movies = vec![
            Row::new(["drama", "comedy"], ["US"], 2000, 90.0),
            Row::new(["drama"], ["US"], 2001, 90.0),
        ];
        let shows = vec![
            Row::new(["reality"], ["US"], 2000, 30.0).with_kind(TitleKind::Show),
            Row::new(["reality", "drama"], ["US"], 2000, 30.0).with_kind(TitleKind::Show),
            Row::new(["crime"], ["US"], 2000, 30.0).with_kind(TitleKind::Show),
        ];

        let main = main_genres(&movies, &shows, 8);

        assert_eq!(main.movies, vec!["drama", "comedy"]);
        assert_eq!(main.shows, vec!["reality", "drama", "crime"]);
    }

    #[test]
    fn empty_tables_produce_empty_sections() {
        let report = ReportBuilder::new(Config::default())
            .build(&[], &[])
            .expect("empty tables are not an error");

        assert!(report.genre_shares.is_empty());
        assert!(report.country_shares.is_empty());
        assert!(report.movie_genres_by_year.is_empty());
        assert_eq!(report.genre_dummies.row_count(), 0);
        assert!(report.platform.is_none());
    }

    #[test]
    fn platform_branding_is_attached_on_request() {
        let report = ReportBuilder::new(Config::default())
            .with_platform(Some(Platform::Hulu))
            .build(&[], &[])
            .expect("report");

        assert_eq!(report.platform.map(|branding| branding.label), Some("hulu"));
    }
}
