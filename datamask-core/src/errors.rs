//! errors.rs - Custom error types for the datamask-core library.
//!
//! Construction of a masker is the only fallible step on the masking path;
//! everything after that is infallible. Typed-record conversion and rule-file
//! loading have their own variants so callers can tell them apart.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced by the `datamask-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream `match` statements.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MaskError {
    #[error("Failed to compile masking rule '{0}': {1}")]
    RuleCompilation(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Failed to compile the combined masking pattern: {0}")]
    CombinedPattern(regex::Error),

    #[error("Failed to convert record into a generic map: {0}")]
    Conversion(#[from] serde_json::Error),

    #[error("Record converted to {0}, expected an object with string keys")]
    NotAMap(&'static str),

    #[error("Invalid rule configuration: {0}")]
    Config(String),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
