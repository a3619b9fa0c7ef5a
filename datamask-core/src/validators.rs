// File: datamask-core/src/validators.rs
//! Small helpers shared by the masking functions of the built-in rules.
//!
//! Replace functions receive the raw matched text, separators included. These
//! helpers normalize that text so a rule can check the exact digit count
//! before deciding whether to transform the match or hand it back untouched.
//!
//! License: MIT OR APACHE 2.0

/// Characters stripped by [`clean_number`].
const NUMBER_SEPARATORS: [char; 6] = [' ', '-', '.', '/', '(', ')'];

/// Removes space, dash, dot, slash and parenthesis characters.
///
/// Any other character (letters, `+`, other whitespace) is kept, so callers
/// usually follow up with [`is_all_digits`].
///
/// # Examples
///
/// ```
/// use datamask_core::validators::clean_number;
/// assert_eq!(clean_number("12.345.678/0001-90"), "12345678000190");
/// ```
pub fn clean_number(s: &str) -> String {
    s.chars().filter(|c| !NUMBER_SEPARATORS.contains(c)).collect()
}

/// Returns `true` if every character is an ASCII digit.
///
/// Vacuously `true` for the empty string.
pub fn is_all_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}
