//! Rule compilation for the regex masker.
//!
//! This module turns the rule list of a `MaskConfig` into the immutable
//! `CompiledRules` that engines share across threads. It owns the combined
//! pattern used to find match boundaries and the per-rule patterns used to
//! decide which rule a match belongs to.

pub mod compiler;
