//! Best-effort phone number normalization
//!
//! The CRM front end submits numbers in whatever format an agent typed.
//! Normalization strips formatting noise before the number goes on the
//! wire; it never rejects, and caller-visible recipient strings are left
//! untouched.

/// Strip formatting punctuation, whitespace, and `+` signs.
///
/// `+55 (11) 99999-0001` becomes `5511999990001`. Anything that is not
/// obviously formatting is kept as-is.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.' | '+'))
        .collect()
}
