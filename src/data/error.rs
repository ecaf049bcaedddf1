use thiserror::Error;

/// Structural problems with an indicator table, detected at load time.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: '{raw}' is not a valid year")]
    InvalidYear { row: usize, raw: String },

    #[error("row {row}: '{raw}' is not a numeric value")]
    InvalidValue { row: usize, raw: String },

    #[error("row {row}: column '{column}' is empty")]
    EmptyCell { row: usize, column: &'static str },

    #[error("no rows found for country '{0}'")]
    UnknownCountry(String),
}
