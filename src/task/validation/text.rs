//! Free-text sanitisation and injection signature matching.
//!
//! Signature matching is a heuristic, not a parser. It accepts false
//! positives on ordinary prose ("please update the select list from ...")
//! and will miss many real injection variants.

use super::{ValidationError, ValidationResult};
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use std::sync::LazyLock;

/// Case-insensitive signatures of probable SQL or script injection.
const INJECTION_SIGNATURES: [&str; 12] = [
    r"(\bOR\b|\bAND\b).*=.*",
    r"';|--;|/\*|\*/",
    r"\bEXEC\b|\bEXECUTE\b",
    r"\bDROP\b|\bDELETE\b|\bUPDATE\b|\bINSERT\b",
    r"\bSELECT\b.*\bFROM\b",
    r"\bUNION\b.*\bSELECT\b",
    r"xp_cmdshell",
    r"\bSCRIPT\b.*>",
    r"<\s*script",
    r"javascript:",
    r"onerror\s*=",
    r"onload\s*=",
];

/// Fragments removed from rich text before it is re-checked.
const RICH_TEXT_STRIP: [&str; 3] = [r"<script[^>]*>.*?</script>", r"javascript:", r"on\w+\s*="];

#[expect(
    clippy::expect_used,
    reason = "signatures are constant patterns exercised by the unit tests"
)]
static SIGNATURE_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSetBuilder::new(INJECTION_SIGNATURES)
        .case_insensitive(true)
        .build()
        .expect("injection signatures must compile")
});

#[expect(
    clippy::expect_used,
    reason = "strip patterns are constant patterns exercised by the unit tests"
)]
static RICH_TEXT_STRIPPERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RICH_TEXT_STRIP
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("rich text strip patterns must compile")
        })
        .collect()
});

/// Trims the input and collapses every whitespace run to one space.
///
/// Whitespace-only input becomes the empty string. Never fails.
///
/// # Examples
///
/// ```
/// use taskroster::task::validation::sanitize_plain_text;
///
/// assert_eq!(sanitize_plain_text("  fix \t the\n\nbuild "), "fix the build");
/// assert_eq!(sanitize_plain_text(" \n "), "");
/// ```
#[must_use]
pub fn sanitize_plain_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns `true` when the input matches any injection signature,
/// ignoring case.
///
/// # Examples
///
/// ```
/// use taskroster::task::validation::detect_injection_pattern;
///
/// assert!(detect_injection_pattern("name' or 1=1"));
/// assert!(!detect_injection_pattern("Prepare quarterly report"));
/// ```
#[must_use]
pub fn detect_injection_pattern(input: &str) -> bool {
    !input.trim().is_empty() && SIGNATURE_SET.is_match(input)
}

/// Sanitises a plain-text field and rejects it when an injection signature
/// matches.
///
/// Empty input yields an empty string; required-field checks belong to the
/// caller.
///
/// # Errors
///
/// Returns [`ValidationError::InjectionDetected`] naming `field` when the
/// cleaned value matches a signature.
pub fn validate_and_sanitize(input: &str, field: &str) -> ValidationResult<String> {
    let cleaned = sanitize_plain_text(input);
    if detect_injection_pattern(&cleaned) {
        return Err(ValidationError::injection(field));
    }
    Ok(cleaned)
}

/// Sanitises free-form rich text.
///
/// After whitespace normalisation, `<script>` blocks, `javascript:` prefixes
/// and inline `on<event>=` handlers are stripped. The remainder is checked
/// against the injection signatures once more.
///
/// # Errors
///
/// Returns [`ValidationError::UnsafeRichText`] when the stripped text still
/// matches a signature.
pub fn sanitize_rich_text(input: &str) -> ValidationResult<String> {
    let mut text = sanitize_plain_text(input);
    for stripper in RICH_TEXT_STRIPPERS.iter() {
        text = stripper.replace_all(&text, "").into_owned();
    }

    if detect_injection_pattern(&text) {
        return Err(ValidationError::UnsafeRichText);
    }
    Ok(text)
}
