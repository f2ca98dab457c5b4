use std::{env, num::NonZeroUsize};

use thiserror::Error;

use crate::stats::{
    MAIN_GENRE_COUNT, TOP_CATEGORY_COUNT,
    dummy::{COUNTRY_DUMMY_VOCABULARY, GENRE_DUMMY_VOCABULARY},
    share::{COUNTRY_MIN_SHARE, DEFAULT_PRECISION, GENRE_MIN_SHARE},
};

#[cfg(test)]
use once_cell::sync::Lazy;
#[cfg(test)]
pub(crate) static ENV_MUTEX: Lazy<std::sync::Mutex<()>> = Lazy::new(|| std::sync::Mutex::new(()));

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    main_genre_count: NonZeroUsize,
    top_category_count: NonZeroUsize,
    genre_min_share: f64,
    country_min_share: f64,
    share_precision: u32,
    genre_dummy_vocabulary: Vec<String>,
    country_dummy_vocabulary: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            main_genre_count: NonZeroUsize::new(MAIN_GENRE_COUNT).unwrap_or(NonZeroUsize::MIN),
            top_category_count: NonZeroUsize::new(TOP_CATEGORY_COUNT)
                .unwrap_or(NonZeroUsize::MIN),
            genre_min_share: GENRE_MIN_SHARE,
            country_min_share: COUNTRY_MIN_SHARE,
            share_precision: DEFAULT_PRECISION,
            genre_dummy_vocabulary: GENRE_DUMMY_VOCABULARY.map(String::from).to_vec(),
            country_dummy_vocabulary: COUNTRY_DUMMY_VOCABULARY.map(String::from).to_vec(),
        }
    }
}

impl Config {
    /// 環境変数から集計パラメータを読み込み、検証する。
    ///
    /// 未設定の項目はダッシュボードの既定値（主要ジャンル8件、上位10件、
    /// ジャンル3%・国2%の閾値、小数2桁）になる。
    ///
    /// # Errors
    /// 数値のパースに失敗した場合や、閾値が `[0, 1]` の範囲外、語彙が空の場合は
    /// [`ConfigError::Invalid`] を返す。
    pub fn from_env() -> Result<Self, ConfigError> {
        let main_genre_count = parse_non_zero_usize("INSIGHTS_MAIN_GENRE_COUNT", MAIN_GENRE_COUNT)?;
        let top_category_count =
            parse_non_zero_usize("INSIGHTS_TOP_CATEGORY_COUNT", TOP_CATEGORY_COUNT)?;

        // Long-tail thresholds
        let genre_min_share = parse_share("INSIGHTS_GENRE_MIN_SHARE", GENRE_MIN_SHARE)?;
        let country_min_share = parse_share("INSIGHTS_COUNTRY_MIN_SHARE", COUNTRY_MIN_SHARE)?;
        let share_precision = parse_u32("INSIGHTS_SHARE_PRECISION", DEFAULT_PRECISION)?;

        // Indicator column vocabularies
        let genre_dummy_vocabulary = parse_vocabulary(
            "INSIGHTS_GENRE_DUMMY_VOCABULARY",
            &GENRE_DUMMY_VOCABULARY.join(","),
        )?;
        let country_dummy_vocabulary = parse_vocabulary(
            "INSIGHTS_COUNTRY_DUMMY_VOCABULARY",
            &COUNTRY_DUMMY_VOCABULARY.join(","),
        )?;

        Ok(Self {
            main_genre_count,
            top_category_count,
            genre_min_share,
            country_min_share,
            share_precision,
            genre_dummy_vocabulary,
            country_dummy_vocabulary,
        })
    }

    #[must_use]
    pub fn main_genre_count(&self) -> usize {
        self.main_genre_count.get()
    }

    #[must_use]
    pub fn top_category_count(&self) -> usize {
        self.top_category_count.get()
    }

    #[must_use]
    pub fn genre_min_share(&self) -> f64 {
        self.genre_min_share
    }

    #[must_use]
    pub fn country_min_share(&self) -> f64 {
        self.country_min_share
    }

    #[must_use]
    pub fn share_precision(&self) -> u32 {
        self.share_precision
    }

    #[must_use]
    pub fn genre_dummy_vocabulary(&self) -> &[String] {
        &self.genre_dummy_vocabulary
    }

    #[must_use]
    pub fn country_dummy_vocabulary(&self) -> &[String] {
        &self.country_dummy_vocabulary
    }
}

fn parse_non_zero_usize(name: &'static str, default: usize) -> Result<NonZeroUsize, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    let parsed = raw.parse::<usize>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })?;
    NonZeroUsize::new(parsed).ok_or_else(|| ConfigError::Invalid {
        name,
        source: anyhow::anyhow!("must be greater than zero"),
    })
}

fn parse_u32(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse::<u32>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })
}

fn parse_f64(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse::<f64>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })
}

fn parse_share(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = parse_f64(name, default)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Invalid {
            name,
            source: anyhow::anyhow!("value must be between 0 and 1, got {value}"),
        });
    }
    Ok(value)
}

fn parse_csv(name: &'static str, default: &str) -> Vec<String> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_vocabulary(name: &'static str, default: &str) -> Result<Vec<String>, ConfigError> {
    let values = parse_csv(name, default);
    if values.is_empty() {
        return Err(ConfigError::Invalid {
            name,
            source: anyhow::anyhow!("vocabulary must contain at least one key"),
        });
    }
    Ok(values)
}
