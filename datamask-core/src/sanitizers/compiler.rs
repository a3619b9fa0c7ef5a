//! compiler.rs - Compiles masking rules into an immutable, shareable rule set.
//!
//! Every non-empty pattern is compiled twice: once on its own, for deciding
//! which rule owns a match, and once as part of a single combined alternation
//! that locates match boundaries for all rules in one pass.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::{MaskRule, ReplaceFn, MAX_PATTERN_LENGTH};
use crate::errors::MaskError;
use crate::mask_log::log_mask_action_debug;

/// Upper bound on the compiled size of any single regex.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A single rule, ready for dispatch.
pub struct CompiledRule {
    /// The rule's name, as given.
    pub name: String,
    /// The rule's own regex. `None` when the pattern was empty.
    pub regex: Option<Regex>,
    /// The replacement function, if the rule has one.
    pub replace: Option<ReplaceFn>,
}

impl CompiledRule {
    /// Returns the replacement for `matched` if this rule owns it.
    ///
    /// Rules with an empty pattern or without a replacement function never
    /// claim a match.
    pub fn try_replace(&self, matched: &str) -> Option<String> {
        let regex = self.regex.as_ref()?;
        let replace = self.replace.as_ref()?;
        if regex.is_match(matched) {
            Some(replace(matched))
        } else {
            None
        }
    }
}

impl std::fmt::Debug for CompiledRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledRule")
            .field("name", &self.name)
            .field("regex", &self.regex.as_ref().map(Regex::as_str))
            .field("has_replace", &self.replace.is_some())
            .finish()
    }
}

/// The full compiled rule set.
#[derive(Debug)]
pub struct CompiledRules {
    /// Every rule in declaration order, empty-pattern rules included.
    pub rules: Vec<CompiledRule>,
    /// Alternation of all non-empty patterns. `None` when there are none,
    /// in which case masking is the identity.
    pub combined: Option<Regex>,
}

impl CompiledRules {
    /// `true` when at least one rule has a non-empty pattern.
    pub fn is_active(&self) -> bool {
        self.combined.is_some()
    }

    /// Replacement for one match of the combined pattern.
    ///
    /// The first rule in declaration order that claims the match wins. If no
    /// rule claims it, the match is returned unchanged.
    pub fn dispatch(&self, matched: &str) -> String {
        for rule in &self.rules {
            if let Some(masked) = rule.try_replace(matched) {
                log_mask_action_debug(&rule.name, matched, &masked);
                return masked;
            }
        }
        matched.to_string()
    }
}

/// Builds a regex with the limits every rule is compiled under.
pub(crate) fn build_regex(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
}

/// Compiles a list of [`MaskRule`]s into [`CompiledRules`].
///
/// All per-rule problems are collected and reported together. A combined
/// pattern that fails to compile even though every rule compiled on its own
/// (for example two rules declaring the same capture group name) is reported
/// as [`MaskError::CombinedPattern`].
pub fn compile_rules(rules_to_compile: Vec<MaskRule>) -> Result<CompiledRules, MaskError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();
    let mut combined_parts: Vec<&str> = Vec::new();

    for rule in &rules_to_compile {
        if rule.pattern.is_empty() {
            warn!("Rule '{}' has an empty pattern; it will never match.", &rule.name);
            compiled_rules.push(CompiledRule {
                name: rule.name.clone(),
                regex: None,
                replace: rule.replace.clone(),
            });
            continue;
        }

        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(MaskError::PatternLengthExceeded(
                rule.name.clone(),
                rule.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        match build_regex(&rule.pattern) {
            Ok(regex) => {
                log::debug!(
                    target: "datamask_core::compiler",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                combined_parts.push(&rule.pattern);
                compiled_rules.push(CompiledRule {
                    name: rule.name.clone(),
                    regex: Some(regex),
                    replace: rule.replace.clone(),
                });
            }
            Err(e) => {
                compilation_errors.push(MaskError::RuleCompilation(rule.name.clone(), e));
            }
        }
    }

    match compilation_errors.len() {
        0 => {}
        1 => return Err(compilation_errors.remove(0)),
        n => {
            let error_message = compilation_errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
                .join("\n");
            return Err(MaskError::Fatal(format!(
                "Failed to compile {} rule(s):\n{}",
                n, error_message
            )));
        }
    }

    let combined = if combined_parts.is_empty() {
        debug!("No rule has a non-empty pattern; masking is disabled.");
        None
    } else {
        let source = combined_parts.join("|");
        Some(build_regex(&source).map_err(MaskError::CombinedPattern)?)
    };

    debug!(
        "Finished compiling rules. Total compiled: {}, active patterns: {}.",
        compiled_rules.len(),
        combined_parts.len()
    );
    Ok(CompiledRules {
        rules: compiled_rules,
        combined,
    })
}
