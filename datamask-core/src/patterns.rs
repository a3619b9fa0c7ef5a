//! patterns.rs - The built-in catalog of sensitive-data rules.
//!
//! Each built-in rule pairs a regex with a masking function. The regex only
//! finds candidates; the masking function normalizes the match and checks its
//! exact digit count before transforming it, handing the match back unchanged
//! when the count is wrong.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{MaskRule, ReplaceFn};
use crate::validators::{clean_number, is_all_digits};

// Catalog patterns use ASCII classes and word boundaries, so a number glued
// to a non-ASCII letter still matches and non-ASCII digits never do.

/// 13 to 16 digits, optionally separated by spaces or dashes.
pub const CREDIT_CARD_PATTERN: &str = r"(?-u:\b(?:\d[ -]*?){13,16}\d\b)";
pub const EMAIL_PATTERN: &str = r"(?-u:\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b)";
/// Brazilian individual taxpayer ID (CPF), e.g. `123.456.789-00`.
pub const CPF_PATTERN: &str = r"(?-u:\b\d{3}\.?\d{3}\.?\d{3}-?\d{2}\b)";
/// Brazilian company taxpayer ID (CNPJ), e.g. `12.345.678/0001-90`.
pub const CNPJ_PATTERN: &str = r"(?-u:\b\d{2}\.?\d{3}\.?\d{3}/?\d{4}-?\d{2}\b)";
/// Brazilian phone numbers with optional `+55` and area code.
pub const PHONE_PATTERN: &str = r"(?-u:(?:\+?55\s?)?(?:\(?\d{2}\)?[\s-]?)?\d{4,5}[\s-]?\d{4})";

/// The built-in masking styles, also usable by name in rule files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskStyle {
    CreditCard,
    Email,
    Cpf,
    Cnpj,
    Phone,
}

impl MaskStyle {
    pub const ALL: [MaskStyle; 5] = [
        MaskStyle::CreditCard,
        MaskStyle::Email,
        MaskStyle::Cpf,
        MaskStyle::Cnpj,
        MaskStyle::Phone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MaskStyle::CreditCard => "credit_card",
            MaskStyle::Email => "email",
            MaskStyle::Cpf => "cpf",
            MaskStyle::Cnpj => "cnpj",
            MaskStyle::Phone => "phone",
        }
    }

    pub fn pattern(self) -> &'static str {
        match self {
            MaskStyle::CreditCard => CREDIT_CARD_PATTERN,
            MaskStyle::Email => EMAIL_PATTERN,
            MaskStyle::Cpf => CPF_PATTERN,
            MaskStyle::Cnpj => CNPJ_PATTERN,
            MaskStyle::Phone => PHONE_PATTERN,
        }
    }

    pub fn replace_fn(self) -> ReplaceFn {
        let f: fn(&str) -> String = match self {
            MaskStyle::CreditCard => mask_credit_card,
            MaskStyle::Email => mask_email,
            MaskStyle::Cpf => mask_cpf,
            MaskStyle::Cnpj => mask_cnpj,
            MaskStyle::Phone => mask_phone,
        };
        Arc::new(f)
    }

    /// The complete built-in rule for this style.
    pub fn rule(self) -> MaskRule {
        MaskRule {
            name: self.name().to_string(),
            pattern: self.pattern().to_string(),
            replace: Some(self.replace_fn()),
        }
    }
}

static DEFAULT_RULES: Lazy<Vec<MaskRule>> = Lazy::new(|| vec![MaskStyle::CreditCard.rule()]);

static EXTENDED_RULES: Lazy<Vec<MaskRule>> =
    Lazy::new(|| MaskStyle::ALL.iter().map(|style| style.rule()).collect());

/// The rules a masker uses when it is given no options: `credit_card` only.
pub fn default_rules() -> Vec<MaskRule> {
    DEFAULT_RULES.clone()
}

/// Every built-in rule: credit_card, email, cpf, cnpj, phone.
pub fn extended_rules() -> Vec<MaskRule> {
    EXTENDED_RULES.clone()
}

pub fn credit_card_rule() -> MaskRule {
    MaskStyle::CreditCard.rule()
}

pub fn email_rule() -> MaskRule {
    MaskStyle::Email.rule()
}

pub fn cpf_rule() -> MaskRule {
    MaskStyle::Cpf.rule()
}

pub fn cnpj_rule() -> MaskRule {
    MaskStyle::Cnpj.rule()
}

pub fn phone_rule() -> MaskRule {
    MaskStyle::Phone.rule()
}

/// `4111-1111-1111-1111` becomes `4111********1111`.
///
/// Anything that does not clean down to exactly 16 digits is returned as-is.
pub fn mask_credit_card(card: &str) -> String {
    let clean = clean_number(card);
    if clean.len() == 16 && is_all_digits(&clean) {
        format!("{}********{}", &clean[..4], &clean[12..])
    } else {
        card.to_string()
    }
}

/// `jane.doe@example.com` becomes `ja***@example.com`.
///
/// Usernames of two characters or fewer are hidden entirely (`***@domain`).
/// The prefix is counted in chars, so non-ASCII usernames are never split
/// inside a code point.
pub fn mask_email(email: &str) -> String {
    let parts: Vec<&str> = email.split('@').collect();
    let [username, domain] = parts.as_slice() else {
        return email.to_string();
    };

    if username.chars().count() > 2 {
        let prefix: String = username.chars().take(2).collect();
        format!("{}***@{}", prefix, domain)
    } else {
        format!("***@{}", domain)
    }
}

/// `123.456.789-00` becomes `123***.***-00`.
pub fn mask_cpf(cpf: &str) -> String {
    let clean = clean_number(cpf);
    if clean.len() == 11 && is_all_digits(&clean) {
        format!("{}***.***-{}", &clean[..3], &clean[9..])
    } else {
        cpf.to_string()
    }
}

/// `12.345.678/0001-90` becomes `12***.***/****-90`.
pub fn mask_cnpj(cnpj: &str) -> String {
    let clean = clean_number(cnpj);
    if clean.len() == 14 && is_all_digits(&clean) {
        format!("{}***.***/****-{}", &clean[..2], &clean[12..])
    } else {
        cnpj.to_string()
    }
}

/// Keeps the first four digits and everything from the ninth on.
///
/// Only 10 or 11 digit numbers are masked; a leading `+` survives cleaning,
/// so international forms pass through unchanged.
pub fn mask_phone(phone: &str) -> String {
    let clean = clean_number(phone);
    if (10..=11).contains(&clean.len()) && is_all_digits(&clean) {
        format!("{}****{}", &clean[..4], &clean[8..])
    } else {
        phone.to_string()
    }
}
