// datamask-core/src/engine.rs
//! Defines the core MaskingEngine trait.
//!
//! The `MaskingEngine` trait is the seam between code that wants data masked
//! (loggers, exporters, transport layers) and the strategy that does the
//! masking. Engines are built once and shared; every method takes `&self`
//! and must be safe to call from many threads at the same time.
//!
//! License: MIT OR APACHE 2.0

use crate::sanitizers::compiler::CompiledRules;
use crate::value::Value;

/// A trait that defines the core functionality of a masking engine.
pub trait MaskingEngine: Send + Sync {
    /// Masks every string leaf of `value`, returning a new value tree.
    ///
    /// Containers keep their keys, length and order; keys of any type are
    /// never inspected. Scalars come back unchanged. The input is not
    /// modified.
    fn mask(&self, value: &Value) -> Value;

    /// Masks a single string.
    fn mask_str(&self, s: &str) -> String;

    /// Returns the compiled rules used by the engine.
    fn compiled_rules(&self) -> &CompiledRules;
}
