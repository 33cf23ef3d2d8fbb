// src/core/names.rs
//! First-name extraction from free-form name strings.

/// Extracts the lowercase first name from a full name.
///
/// Dots, underscores and commas separate parts, hyphens do not ("jean-pierre"
/// stays whole). A single comma marks an inverted "Last, First" name, which
/// is read from the part after the comma. Initials are skipped when a longer
/// part exists.
pub fn extract_first_name(name: &str) -> String {
    let text = match name.split_once(',') {
        Some((last, first)) if !first.contains(',') && !first.trim().is_empty() && !last.trim().is_empty() => first,
        _ => name,
    };

    let parts: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || matches!(c, '.' | '_' | ','))
        .map(|p| p.trim_matches(|c: char| c == '-' || c == '\'' || c == '"'))
        .filter(|p| !p.is_empty())
        .collect();

    let mut candidates: Vec<&str> = parts.iter().copied().filter(|p| p.chars().count() > 1).collect();
    if candidates.is_empty() {
        candidates = parts;
    }

    candidates.first().map(|p| p.to_lowercase()).unwrap_or_default()
}

/// True if the name has no embedded whitespace, i.e. looks like a username.
pub fn is_single_token(name: &str) -> bool {
    name.split_whitespace().count() == 1
}

/// Removes ASCII digits ("bogdan85" -> "bogdan").
pub fn strip_digits(name: &str) -> String {
    name.chars().filter(|c| !c.is_ascii_digit()).collect()
}
