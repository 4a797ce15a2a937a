//! Header normalization and column lookup by header text.

/// Trim, drop a BOM and collapse inner whitespace runs to one space.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Zero-based index of the first header equal to `name` after normalization.
pub fn find_column<S: AsRef<str>>(headers: &[S], name: &str) -> Option<usize> {
    let wanted = normalize_header(name);
    headers
        .iter()
        .position(|header| normalize_header(header.as_ref()) == wanted)
}
