//!
//! # Credential Verification
//!
//! Pure, deterministic checks applied to sign-up credentials before anything
//! touches the store. Both functions are total over arbitrary text input:
//! they return `false` for anything unacceptable and never panic.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // local@domain where the domain carries at least one sub-label plus a
    // multi-character alphabetic top-level label. Rejects single-label
    // domains and bare short TLDs such as "a@b.c".
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap();
}

/// Characters counted as "special" by the password strength rule.
const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?`~";

/// Returns `true` when `candidate` is a structurally valid email address.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_REGEX.is_match(candidate)
}

/// Returns `true` when `candidate` satisfies the password strength rules:
/// at least 8 characters, one digit, one uppercase letter, and one character
/// from [`SPECIAL_CHARS`].
pub fn is_strong_password(candidate: &str) -> bool {
    candidate.chars().count() >= 8
        && candidate.chars().any(|c| c.is_ascii_digit())
        && candidate.chars().any(|c| c.is_ascii_uppercase())
        && candidate.chars().any(|c| SPECIAL_CHARS.contains(c))
}
