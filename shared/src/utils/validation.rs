//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Check if a string is not empty
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if an optional string is present and not blank
pub fn is_present(value: Option<&str>) -> bool {
    value.map(not_empty).unwrap_or(false)
}

/// Check if an email address is plausibly valid
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_PATTERN.is_match(email)
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email address for logging, keeping the first character of the
/// local part and the full domain: `alice@x.com` becomes `a***@x.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
