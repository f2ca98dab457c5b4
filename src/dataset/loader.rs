use std::{fs::File, io::BufReader, io::Read, path::Path};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::row::{Categories, Row, TitleKind};
use crate::error::StatsError;

/// Row as it arrives on the wire; every column is optional until validated.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    genres: Option<Vec<String>>,
    #[serde(default)]
    production_countries: Option<Vec<String>>,
    #[serde(default)]
    release_year: Option<Value>,
    #[serde(default)]
    runtime: Option<Value>,
    #[serde(default, rename = "type")]
    kind: Option<TitleKind>,
}

impl RawRow {
    fn validate(self, index: usize) -> Result<Row, StatsError> {
        let genres = self.genres.ok_or(StatsError::MissingField {
            row: index,
            field: "genres",
        })?;
        let production_countries = self.production_countries.ok_or(StatsError::MissingField {
            row: index,
            field: "production_countries",
        })?;
        let release_year = parse_year(index, self.release_year)?;
        let runtime = parse_runtime(index, self.runtime)?;

        Ok(Row {
            genres: Categories::new(genres),
            production_countries: Categories::new(production_countries),
            release_year,
            runtime,
            kind: self.kind.unwrap_or_default(),
        })
    }
}

fn parse_year(index: usize, value: Option<Value>) -> Result<i32, StatsError> {
    let invalid = |reason: String| StatsError::InvalidField {
        row: index,
        field: "release_year",
        reason,
    };

    match value {
        None | Some(Value::Null) => Err(StatsError::MissingField {
            row: index,
            field: "release_year",
        }),
        Some(Value::Number(number)) => {
            let year = number
                .as_i64()
                .ok_or_else(|| invalid(format!("expected an integer, got {number}")))?;
            i32::try_from(year).map_err(|_| invalid(format!("year {year} is out of range")))
        }
        Some(other) => Err(invalid(format!("expected an integer, got {other}"))),
    }
}

fn parse_runtime(index: usize, value: Option<Value>) -> Result<f64, StatsError> {
    match value {
        None | Some(Value::Null) => Err(StatsError::MissingField {
            row: index,
            field: "runtime",
        }),
        Some(Value::Number(number)) => number.as_f64().ok_or_else(|| StatsError::InvalidField {
            row: index,
            field: "runtime",
            reason: format!("{number} is not representable as f64"),
        }),
        Some(other) => Err(StatsError::InvalidField {
            row: index,
            field: "runtime",
            reason: format!("expected a number, got {other}"),
        }),
    }
}

/// JSON 配列形式のデータセットを読み込み、全行を検証する。
///
/// # Errors
/// JSON として不正な場合は [`StatsError::Dataset`]、必須カラムが欠けている・型が
/// 不正な行があれば最初に見つかった行の [`StatsError::MissingField`] /
/// [`StatsError::InvalidField`] を返す。
pub fn load_rows<R: Read>(reader: R) -> Result<Vec<Row>, StatsError> {
    let raw: Vec<RawRow> = serde_json::from_reader(reader)?;
    let rows = raw
        .into_iter()
        .enumerate()
        .map(|(index, row)| row.validate(index))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(rows = rows.len(), "dataset validated");
    Ok(rows)
}

/// Same as [`load_rows`] for an in-memory JSON document.
///
/// # Errors
/// See [`load_rows`].
pub fn rows_from_json(json: &str) -> Result<Vec<Row>, StatsError> {
    load_rows(json.as_bytes())
}

/// # Errors
/// Returns [`StatsError::Io`] when the file cannot be opened, otherwise see
/// [`load_rows`].
pub fn load_rows_from_path(path: &Path) -> Result<Vec<Row>, StatsError> {
    let file = File::open(path)?;
    let rows = load_rows(BufReader::new(file))?;
    info!(path = %path.display(), rows = rows.len(), "dataset loaded");
    Ok(rows)
}

/// Splits rows into `(movies, shows)` keeping the original order in both.
#[must_use]
pub fn partition_by_kind(rows: Vec<Row>) -> (Vec<Row>, Vec<Row>) {
    rows.into_iter()
        .partition(|row| row.kind == TitleKind::Movie)
}
