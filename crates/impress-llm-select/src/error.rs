//! Error types for impress-llm-select
//!
//! The resolution functions themselves never fail. Errors only come from
//! the strict token codec and from catalog loading.

use thiserror::Error;

/// Result type alias for fallible selection operations
pub type Result<T> = std::result::Result<T, SelectError>;

/// Main error type for fallible selection operations
#[derive(Error, Debug)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error), uniffi(flat_error))]
pub enum SelectError {
    /// Token encode/decode errors
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Catalog loading errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogLoadError),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Errors from the strict `name__provider__modelName` codec
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// A field contains the delimiter and would not decode back
    #[error("Field {field} contains the token delimiter: {value:?}")]
    DelimiterInField { field: &'static str, value: String },

    /// The token does not split into exactly three fields
    #[error("Expected {expected} token segments, found {found}")]
    SegmentCount { expected: usize, found: usize },
}

/// Errors that can occur when loading an LLM catalog from TOML
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Duplicate provider name: {0}")]
    DuplicateProvider(String),

    #[error("Persona {persona} overrides unknown provider {provider}")]
    UnknownPersonaProvider { persona: String, provider: String },
}

impl From<std::io::Error> for CatalogLoadError {
    fn from(err: std::io::Error) -> Self {
        CatalogLoadError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogLoadError {
    fn from(err: toml::de::Error) -> Self {
        CatalogLoadError::Parse(err.to_string())
    }
}
