// File: datamask-core/src/headless.rs

//! `headless.rs`
//! One-shot convenience wrappers: build a masker from options and apply it
//! immediately. Each call compiles its rules, so code that masks repeatedly
//! should build a `RegexMasker` once and reuse it.

use serde::Serialize;

use crate::config::MaskOption;
use crate::engine::MaskingEngine;
use crate::engines::regex_engine::RegexMasker;
use crate::errors::MaskError;
use crate::value::{Map, Value};

/// Masks a generic value with a masker built from `options`.
///
/// Empty `options` means the default rules.
pub fn mask_data(data: &Value, options: Vec<MaskOption>) -> Result<Value, MaskError> {
    let masker = RegexMasker::with_options(options)?;
    Ok(masker.mask(data))
}

/// Masks the fields of a typed record with a masker built from `options`.
pub fn mask_data_typed<T>(record: &T, options: Vec<MaskOption>) -> Result<Map, MaskError>
where
    T: Serialize + ?Sized,
{
    let masker = RegexMasker::with_options(options)?;
    masker.mask_typed(record)
}

/// Masks a string with a masker built from `options`.
pub fn mask_string(data: &str, options: Vec<MaskOption>) -> Result<String, MaskError> {
    let masked = mask_data(&Value::from(data), options)?;
    match masked {
        Value::String(s) => Ok(s),
        _ => Ok(data.to_string()),
    }
}
