use thiserror::Error;

/// Structural problems in the workbook tables. All fatal; softer data problems
/// are [`crate::aggregate::AggregateWarning`]s.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("sheet `{sheet}` not found in workbook")]
    MissingSheet { sheet: String },

    #[error("sheet `{sheet}` is missing required column `{column}`")]
    MissingColumn { sheet: String, column: String },

    #[error("sheet `{sheet}` row {row}: `{column}` is empty")]
    MissingValue {
        sheet: String,
        row: usize,
        column: String,
    },

    #[error("sheet `{sheet}` row {row}: `{column}` holds `{value}`, expected {expected}")]
    InvalidCell {
        sheet: String,
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("unknown column `{0}`")]
    UnknownColumn(String),
}

pub type StatsResult<T> = std::result::Result<T, StatsError>;
