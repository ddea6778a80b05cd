//! Core error types for taxwalk

use thiserror::Error;

/// Main error type for taxwalk operations
#[derive(Error, Debug)]
pub enum TaxwalkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expected {expected} values but got {found} for {kind} record")]
    Schema {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{origin}:{line}: {source}")]
    Malformed {
        origin: String,
        line: usize,
        #[source]
        source: Box<TaxwalkError>,
    },

    #[error("{0} is not a valid record kind")]
    UnknownRecordKind(String),

    #[error("taxid {taxid} is missing from {index} index")]
    MissingTaxon { taxid: String, index: &'static str },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Lineage has no attribute '{0}'")]
    AttributeNotFound(String),

    #[error("Broken lineage: taxid {taxid} is missing from {index} index")]
    BrokenLineage { taxid: String, index: &'static str },

    #[error("Lineage cycle detected at taxid {0}")]
    CyclicLineage(String),

    #[error("Dump source already consumed: {0}")]
    SourceConsumed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TaxwalkError {
    /// True for errors caused by malformed dump content rather than lookups
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            TaxwalkError::Schema { .. }
                | TaxwalkError::Malformed { .. }
                | TaxwalkError::UnknownRecordKind(_)
        )
    }

    /// True for errors a caller can answer with "no such taxon or rank"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TaxwalkError::MissingTaxon { .. }
                | TaxwalkError::KeyNotFound(_)
                | TaxwalkError::AttributeNotFound(_)
        )
    }
}

/// Result type alias for taxwalk operations
pub type TaxwalkResult<T> = Result<T, TaxwalkError>;

impl From<serde_json::Error> for TaxwalkError {
    fn from(err: serde_json::Error) -> Self {
        TaxwalkError::Serialization(err.to_string())
    }
}
