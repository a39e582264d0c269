//! Tag list helpers.

/// Remove duplicates, preserving first-seen order.
pub fn dedupe(input: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    input
        .iter()
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect()
}

/// Remove duplicates and sort case-insensitively.
///
/// This is the canonical ordering of a tag vocabulary.
pub fn alphabetical_dedupe(input: &[String]) -> Vec<String> {
    let mut out = dedupe(input);
    out.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    out
}
