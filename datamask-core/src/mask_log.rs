// datamask-core/src/mask_log.rs
//! Debug logging for masking actions that never leaks the matched text.
//!
//! Matched content is rendered as `[REDACTED]` in log output unless the
//! `DATAMASK_ALLOW_DEBUG_PII` environment variable is set to `true`. The
//! variable is read once per process.

use log::{debug, log_enabled, Level};
use once_cell::sync::Lazy;

/// Whether raw matched content may appear in debug logs.
static PII_DEBUG_ALLOWED: Lazy<bool> = Lazy::new(|| {
    std::env::var("DATAMASK_ALLOW_DEBUG_PII")
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

/// Renders sensitive text as a placeholder that only reveals its length.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let char_count = s.chars().count();
    if char_count <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", char_count)
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

/// Logs that `rule_name` handled a match. No-op unless debug logging is on.
///
/// A rule that hands the match back unchanged has declined it, and its
/// output is the raw match, so only the redacted form is logged.
pub fn log_mask_action_debug(rule_name: &str, original_sensitive_content: &str, masked: &str) {
    if !log_enabled!(target: "datamask_core::mask", Level::Debug) {
        return;
    }
    if masked == original_sensitive_content {
        debug!(
            target: "datamask_core::mask",
            "Rule '{}' declined '{}'",
            rule_name,
            get_loggable_content(original_sensitive_content)
        );
        return;
    }
    debug!(
        target: "datamask_core::mask",
        "Rule '{}' masked '{}' as '{}'",
        rule_name,
        get_loggable_content(original_sensitive_content),
        masked
    );
}
