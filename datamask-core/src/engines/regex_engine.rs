// datamask-core/src/engines/regex_engine.rs
//! A `MaskingEngine` implementation that masks with regular expressions.
//!
//! Strings are scanned once with the combined pattern of all rules. Each match
//! is then handed to the first declared rule whose own pattern matches it.
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::sync::Arc;

use log::{debug, warn};
use regex::Captures;
use serde::Serialize;

use crate::config::{MaskConfig, MaskOption, MaskRule};
use crate::convert::to_generic_map;
use crate::engine::MaskingEngine;
use crate::errors::MaskError;
use crate::sanitizers::compiler::{compile_rules, CompiledRules};
use crate::value::{Map, Value};

/// A regex masker. Cloning is cheap and clones share the compiled rules.
#[derive(Debug, Clone)]
pub struct RegexMasker {
    compiled_rules: Arc<CompiledRules>,
}

impl RegexMasker {
    /// A masker using the built-in default rules.
    pub fn new() -> Result<Self, MaskError> {
        Self::from_config(MaskConfig::default_rules())
    }

    /// A masker built from options. See [`MaskConfig::from_options`].
    pub fn with_options(options: Vec<MaskOption>) -> Result<Self, MaskError> {
        Self::from_config(MaskConfig::from_options(options))
    }

    pub fn from_rules(rules: Vec<MaskRule>) -> Result<Self, MaskError> {
        Self::from_config(MaskConfig { rules })
    }

    pub fn from_config(config: MaskConfig) -> Result<Self, MaskError> {
        let compiled_rules = compile_rules(config.rules)?;
        debug!(
            "RegexMasker ready with {} rules (active: {}).",
            compiled_rules.rules.len(),
            compiled_rules.is_active()
        );
        Ok(Self {
            compiled_rules: Arc::new(compiled_rules),
        })
    }

    /// Masks a string, borrowing the input when nothing matched.
    pub fn mask_cow<'a>(&self, s: &'a str) -> Cow<'a, str> {
        match &self.compiled_rules.combined {
            Some(combined) => combined.replace_all(s, |caps: &Captures<'_>| {
                self.compiled_rules.dispatch(&caps[0])
            }),
            None => Cow::Borrowed(s),
        }
    }

    /// Converts a typed record into a map of its fields, then masks each field.
    pub fn mask_typed<T>(&self, record: &T) -> Result<Map, MaskError>
    where
        T: Serialize + ?Sized,
    {
        let fields = to_generic_map(record)?;
        Ok(self.mask_map(&fields))
    }

    /// Like [`mask_typed`](Self::mask_typed), but a record that cannot be
    /// converted yields an empty map instead of an error.
    pub fn mask_typed_lossy<T>(&self, record: &T) -> Map
    where
        T: Serialize + ?Sized,
    {
        self.mask_typed(record).unwrap_or_else(|e| {
            warn!("Record could not be converted for masking, returning empty map: {}", e);
            Map::new()
        })
    }

    fn mask_map(&self, map: &Map) -> Map {
        map.iter()
            .map(|(key, value)| (key.clone(), self.mask(value)))
            .collect()
    }
}

impl MaskingEngine for RegexMasker {
    fn mask(&self, value: &Value) -> Value {
        if !self.compiled_rules.is_active() {
            return value.clone();
        }

        match value {
            Value::String(s) => Value::String(self.mask_str(s)),
            Value::Sequence(items) => Value::Sequence(items.iter().map(|v| self.mask(v)).collect()),
            Value::Map(map) => Value::Map(self.mask_map(map)),
            Value::AnyMap(pairs) => Value::AnyMap(
                pairs
                    .iter()
                    .map(|(key, v)| (key.clone(), self.mask(v)))
                    .collect(),
            ),
            Value::MapSequence(maps) => {
                Value::MapSequence(maps.iter().map(|m| self.mask_map(m)).collect())
            }
            Value::Opaque(scalar) => Value::Opaque(scalar.clone()),
        }
    }

    fn mask_str(&self, s: &str) -> String {
        self.mask_cow(s).into_owned()
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }
}
