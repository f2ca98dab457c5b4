use thiserror::Error;

/// 集計処理で発生しうるエラー。
///
/// どのエラーも単一の集計呼び出しに閉じており、部分的な失敗やリトライは存在しない。
#[derive(Debug, Error)]
pub enum StatsError {
    /// Total occurrences were zero, so no share can be computed.
    #[error("no category occurrences to normalise in {context}")]
    EmptyInput { context: &'static str },

    #[error("row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: invalid value for `{field}`: {reason}")]
    InvalidField {
        row: usize,
        field: &'static str,
        reason: String,
    },

    /// The key would shadow the `year` entry of a yearly record.
    #[error("category key `{key}` is reserved")]
    ReservedKey { key: String },

    #[error("failed to decode dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
}

impl StatsError {
    /// Whether the error only signals an empty aggregation rather than bad input.
    #[must_use]
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_distinguished_from_validation_errors() {
        let empty = StatsError::EmptyInput {
            context: "genre shares",
        };
        let missing = StatsError::MissingField {
            row: 3,
            field: "genres",
        };

        assert!(empty.is_empty_input());
        assert!(!missing.is_empty_input());
        assert_eq!(
            missing.to_string(),
            "row 3: missing required field `genres`"
        );
    }
}
