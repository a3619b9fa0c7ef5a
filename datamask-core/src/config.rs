//! Configuration management for `datamask-core`.
//!
//! This module defines masking rules, the options used to assemble a rule
//! list for a masker, and the YAML rule-file format for rules declared outside
//! of code.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::errors::MaskError;
use crate::patterns::{self, MaskStyle};
use crate::sanitizers::compiler::build_regex;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A replacement function: receives the matched text, returns its masked form.
///
/// Returning the input unchanged is how a rule declines to transform a match.
pub type ReplaceFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A single masking rule.
#[derive(Clone)]
pub struct MaskRule {
    /// Informational name (e.g. "credit_card"). Need not be unique.
    pub name: String,
    /// Regex source text. An empty pattern never matches anything.
    pub pattern: String,
    /// Replacement for matches owned by this rule. `None` leaves them as-is.
    pub replace: Option<ReplaceFn>,
}

impl MaskRule {
    pub fn new<F>(name: impl Into<String>, pattern: impl Into<String>, replace: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let replace: ReplaceFn = Arc::new(replace);
        Self {
            name: name.into(),
            pattern: pattern.into(),
            replace: Some(replace),
        }
    }

    /// A rule without a replacement function. Its matches are kept verbatim.
    pub fn passthrough(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            replace: None,
        }
    }

    /// A rule that replaces every match with the same text.
    pub fn fixed(name: impl Into<String>, pattern: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(name, pattern, move |_: &str| text.clone())
    }

    pub fn has_replace(&self) -> bool {
        self.replace.is_some()
    }
}

impl fmt::Debug for MaskRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("replace", &self.replace.as_ref().map(|_| "Fn(&str) -> String"))
            .finish()
    }
}

/// One adjustment to the rule list a masker is built from.
#[derive(Debug, Clone)]
pub enum MaskOption {
    /// Replace the whole rule list.
    Rules(Vec<MaskRule>),
    /// Append one rule.
    Rule(MaskRule),
}

impl MaskOption {
    pub fn apply(self, config: &mut MaskConfig) {
        match self {
            MaskOption::Rules(rules) => {
                debug!("Replacing {} rules with {} rules.", config.rules.len(), rules.len());
                config.rules = rules;
            }
            MaskOption::Rule(rule) => {
                debug!("Appending rule '{}'.", rule.name);
                config.rules.push(rule);
            }
        }
    }
}

/// Replaces the entire rule list.
pub fn with_rules(rules: Vec<MaskRule>) -> MaskOption {
    MaskOption::Rules(rules)
}

/// Appends an already built rule.
pub fn with_rule(rule: MaskRule) -> MaskOption {
    MaskOption::Rule(rule)
}

/// Appends a rule built from its parts.
pub fn with_custom_rule<F>(name: impl Into<String>, pattern: impl Into<String>, replace: F) -> MaskOption
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    MaskOption::Rule(MaskRule::new(name, pattern, replace))
}

/// The ordered rule list a masker compiles.
#[derive(Debug, Clone, Default)]
pub struct MaskConfig {
    pub rules: Vec<MaskRule>,
}

impl MaskConfig {
    /// The built-in default catalog.
    pub fn default_rules() -> Self {
        Self {
            rules: patterns::default_rules(),
        }
    }

    /// Builds a rule list from options.
    ///
    /// No options yields the default catalog. Otherwise the list starts empty
    /// and each option is applied in order.
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = MaskOption>,
    {
        let options: Vec<MaskOption> = options.into_iter().collect();
        if options.is_empty() {
            return Self::default_rules();
        }

        let mut config = Self::default();
        for option in options {
            option.apply(&mut config);
        }
        debug!("Built config with {} rules from options.", config.rules.len());
        config
    }
}

/// A rule as declared in a YAML rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleEntry {
    pub name: String,
    /// Regex source. When omitted, the pattern of `mask` is used if set.
    pub pattern: Option<String>,
    /// Fixed replacement text.
    pub replace_with: Option<String>,
    /// Built-in masking style.
    pub mask: Option<MaskStyle>,
}

impl RuleEntry {
    fn effective_pattern(&self) -> String {
        match (&self.pattern, self.mask) {
            (Some(p), _) => p.clone(),
            (None, Some(style)) => style.pattern().to_string(),
            (None, None) => String::new(),
        }
    }

    /// Converts the declaration into a [`MaskRule`].
    pub fn into_rule(self) -> Result<MaskRule, MaskError> {
        let pattern = self.effective_pattern();
        let replace: Option<ReplaceFn> = match (self.replace_with, self.mask) {
            (Some(_), Some(_)) => {
                return Err(MaskError::Config(format!(
                    "rule '{}' sets both `replace_with` and `mask`",
                    self.name
                )));
            }
            (Some(text), None) => {
                let fixed: ReplaceFn = Arc::new(move |_: &str| text.clone());
                Some(fixed)
            }
            (None, Some(style)) => Some(style.replace_fn()),
            (None, None) => None,
        };

        Ok(MaskRule {
            name: self.name,
            pattern,
            replace,
        })
    }
}

/// Top-level structure of a YAML rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

impl RuleFile {
    /// Loads and validates rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading masking rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file {}", path.display()))?;
        let file = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load rule file {}", path.display()))?;

        info!("Loaded {} rules from file {}.", file.rules.len(), path.display());
        Ok(file)
    }

    /// Parses and validates rules from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let file: RuleFile = serde_yml::from_str(text).context("Failed to parse rule YAML")?;
        validate_entries(&file.rules)?;
        Ok(file)
    }

    /// Converts every entry into a [`MaskRule`], keeping file order.
    pub fn into_rules(self) -> Result<Vec<MaskRule>, MaskError> {
        self.rules.into_iter().map(RuleEntry::into_rule).collect()
    }
}

/// Checks each entry and reports every problem found at once.
fn validate_entries(entries: &[RuleEntry]) -> Result<()> {
    let mut errors = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let label = if entry.name.is_empty() {
            format!("#{}", index + 1)
        } else {
            format!("'{}'", entry.name)
        };

        if entry.replace_with.is_some() && entry.mask.is_some() {
            errors.push(format!(
                "Rule {}: `replace_with` and `mask` are mutually exclusive.",
                label
            ));
        }

        let pattern = entry.effective_pattern();
        if pattern.is_empty() {
            warn!("Rule {} has an empty pattern and will never match.", label);
            continue;
        }
        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule {}: pattern length ({}) exceeds maximum allowed ({}).",
                label,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }
        if let Err(e) = build_regex(&pattern) {
            errors.push(format!("Rule {} has an invalid regex pattern: {}", label, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_credit_card() {
        let config = MaskConfig::default_rules();
        assert!(!config.rules.is_empty());
        assert!(config.rules.iter().any(|r| r.name == "credit_card"));
    }

    #[test]
    fn test_from_options_without_options_uses_defaults() {
        let config = MaskConfig::from_options(Vec::new());
        assert_eq!(config.rules.len(), MaskConfig::default_rules().rules.len());
    }

    #[test]
    fn test_from_options_starts_empty() {
        let config = MaskConfig::from_options([with_custom_rule("zip", r"\d{5}-\d{3}", |_| {
            "*****-***".to_string()
        })]);
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].name, "zip");
    }

    #[test]
    fn test_options_apply_in_order() {
        let config = MaskConfig::from_options([
            with_rule(MaskRule::passthrough("first", "a")),
            with_rules(vec![MaskRule::fixed("second", "b", "B")]),
            with_rule(MaskRule::passthrough("third", "")),
        ]);
        let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["second", "third"]);
    }

    #[test]
    fn test_with_custom_rule_appends_to_existing_config() {
        let mut config = MaskConfig::default_rules();
        let initial = config.rules.len();

        with_custom_rule("test", r"test-\d+", |_| "test-***".to_string()).apply(&mut config);

        assert_eq!(config.rules.len(), initial + 1);
        let last = config.rules.last().unwrap();
        assert_eq!(last.name, "test");
        assert_eq!(last.pattern, r"test-\d+");
        assert!(last.has_replace());
    }

    #[test]
    fn test_passthrough_rule_has_no_replace() {
        let mut config = MaskConfig::default_rules();
        with_rule(MaskRule::passthrough("nil_func", "test")).apply(&mut config);
        assert!(!config.rules.last().unwrap().has_replace());
    }

    #[test]
    fn test_rule_entry_both_replacements_rejected() {
        let entry = RuleEntry {
            name: "bad".to_string(),
            pattern: Some("x".to_string()),
            replace_with: Some("y".to_string()),
            mask: Some(MaskStyle::Email),
        };
        assert!(matches!(entry.into_rule(), Err(MaskError::Config(_))));
    }

    #[test]
    fn test_rule_entry_falls_back_to_style_pattern() {
        let entry = RuleEntry {
            name: "card".to_string(),
            mask: Some(MaskStyle::CreditCard),
            ..Default::default()
        };
        let rule = entry.into_rule().unwrap();
        assert_eq!(rule.pattern, MaskStyle::CreditCard.pattern());
        assert_eq!(
            (rule.replace.unwrap())("4111-1111-1111-1111"),
            "4111********1111"
        );
    }

    #[test]
    fn test_debug_does_not_require_fn_debug() {
        let rule = MaskRule::fixed("zip", r"\d{5}", "*****");
        let rendered = format!("{:?}", rule);
        assert!(rendered.contains("zip"));
        assert!(rendered.contains("Fn(&str) -> String"));
    }

    #[test]
    fn test_validation_uses_compiler_size_limit() {
        // Short enough to pass the length cap, too large once compiled.
        let pattern = r"(?:\w{100}){100}";
        assert!(pattern.len() <= MAX_PATTERN_LENGTH);

        let yaml = format!(
            "rules:\n  - name: huge\n    pattern: '{}'\n    replace_with: x\n",
            pattern
        );
        let err = RuleFile::from_yaml_str(&yaml).unwrap_err();
        assert!(format!("{:#}", err).contains("'huge'"), "{:#}", err);

        let compiled =
            crate::sanitizers::compiler::compile_rules(vec![MaskRule::fixed("huge", pattern, "x")]);
        assert!(compiled.is_err());
    }
}
