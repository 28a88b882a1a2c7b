//! # Error Types Module
//!
//! Construction-time errors. Nothing in the matching, scaling or
//! recommendation paths fails on user input; only malformed catalogs and
//! inconsistent configuration are reported as errors.

/// Errors raised while building a substitution catalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The catalog document is not a JSON object of string arrays
    InvalidDocument(String),
    /// A catalog key is empty after normalization
    EmptyKey,
    /// Two catalog keys normalize to the same ingredient
    DuplicateKey(String),
    /// A catalog key has no substitutes
    EmptySubstitutes(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::InvalidDocument(msg) => write!(f, "Invalid catalog document: {msg}"),
            CatalogError::EmptyKey => write!(f, "Catalog key is empty after normalization"),
            CatalogError::DuplicateKey(key) => write!(f, "Duplicate catalog key: {key}"),
            CatalogError::EmptySubstitutes(key) => {
                write!(f, "Catalog key has no substitutes: {key}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidDocument(err.to_string())
    }
}

/// Errors raised when engine configuration is inconsistent
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A scoring weight is negative, NaN or infinite
    InvalidWeight(&'static str),
    /// Exact matches must be worth strictly more than substitute matches
    ExactNotAboveSubstitute,
    /// Fuzzy cutoff must lie in 0.0..=1.0
    InvalidCutoff(f64),
    /// Normalized tokens must keep at least one word
    ZeroTokenWords,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidWeight(name) => {
                write!(f, "Weight '{name}' must be finite and non-negative")
            }
            ConfigError::ExactNotAboveSubstitute => {
                write!(f, "Exact weight must be strictly greater than substitute weight")
            }
            ConfigError::InvalidCutoff(cutoff) => {
                write!(f, "Fuzzy cutoff {cutoff} is outside 0.0..=1.0")
            }
            ConfigError::ZeroTokenWords => write!(f, "Token word limit must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
