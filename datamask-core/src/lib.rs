// datamask-core/src/lib.rs
//! # datamask Core Library
//!
//! `datamask-core` masks sensitive substrings (card numbers, emails, national
//! ID numbers, phone numbers) inside arbitrary nested data before it is
//! logged, stored or transmitted. It walks strings, maps and lists, and
//! replaces every match of a configured rule set with a masked equivalent,
//! leaving everything else untouched.
//!
//! ## Modules
//!
//! * `config`: Defines `MaskRule`, the options that assemble a rule list, and YAML rule files.
//! * `patterns`: The built-in rule catalog (credit card, email, CPF, CNPJ, phone).
//! * `validators`: Number normalization helpers used by the built-in rules.
//! * `sanitizers`: Compiles rules into an immutable `CompiledRules`.
//! * `value`: The generic `Value` tree the masker walks.
//! * `convert`: Flattens typed records into generic maps.
//! * `engine`: Defines the `MaskingEngine` trait.
//! * `engines`: Concrete implementations of `MaskingEngine`.
//! * `headless`: One-shot convenience functions.
//! * `mask_log`: Debug logging that never prints raw matched content.
//!
//! ## Usage Example
//!
//! ```rust
//! use datamask_core::{MaskingEngine, RegexMasker, Value};
//!
//! fn main() -> Result<(), datamask_core::MaskError> {
//!     // Built once, shared freely across threads.
//!     let masker = RegexMasker::new()?;
//!
//!     let masked = masker.mask(&Value::from("card: 4111-1111-1111-1111"));
//!     assert_eq!(masked, Value::from("card: 4111********1111"));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Building a masker is the only fallible step on the masking path and
//! returns [`MaskError`]. Masking itself never fails: shapes the masker does
//! not recognize are returned unchanged. Rule-file loading returns
//! `anyhow::Result` with file context attached.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod convert;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod mask_log;
pub mod patterns;
pub mod sanitizers;
pub mod validators;
pub mod value;

/// Re-exports the rule and configuration types.
pub use config::{
    with_custom_rule,
    with_rule,
    with_rules,
    MaskConfig,
    MaskOption,
    MaskRule,
    ReplaceFn,
    RuleEntry,
    RuleFile,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::MaskError;

/// Re-exports the engine trait and its regex implementation.
pub use engine::MaskingEngine;
pub use engines::regex_engine::RegexMasker;

/// Re-exports the generic value model.
pub use value::{Map, Scalar, Value};

pub use convert::to_generic_map;
pub use patterns::{default_rules, extended_rules, MaskStyle};
pub use validators::{clean_number, is_all_digits};

/// Re-exports the one-shot helpers.
pub use headless::{mask_data, mask_data_typed, mask_string};

pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};
