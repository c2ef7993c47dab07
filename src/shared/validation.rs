use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches markup tags so free-text fields can be stored without them.
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();

    /// Runs of whitespace, collapsed to a single space after tag removal.
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Sanitize a free-text form field: drop markup tags and control characters,
/// collapse internal whitespace and trim the ends. Mirrors what the admin
/// screens expect before any validation runs.
pub fn sanitize_text(input: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(input, "");
    let without_control: String = without_tags.chars().filter(|c| !c.is_control()).collect();
    WHITESPACE_REGEX
        .replace_all(&without_control, " ")
        .trim()
        .to_string()
}
