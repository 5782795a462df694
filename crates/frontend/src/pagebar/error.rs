use contracts::shared::pagination::{InfoField, INFO_BOX_CLASS};
use thiserror::Error;

/// Why a markup-mode response could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no element with class `{}` in response", INFO_BOX_CLASS)]
    MissingInfoBox,

    #[error("{field} field is missing from the pagination info box")]
    MissingField { field: InfoField },

    #[error("{field} field holds non-numeric value {value:?}")]
    NotNumeric { field: InfoField, value: String },
}

#[derive(Debug, Error)]
pub enum PageBarError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to extract pagination info: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Cannot mount page bar: {0}")]
    Mount(String),
}
