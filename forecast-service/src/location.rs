//! Location strings as typed by an editor, and the keys derived from them.

/// Fallback when a rendering names no location.
pub const DEFAULT_LOCATION: &str = "London";

/// Derive the cache key for a display location.
///
/// Lower-cases, folds runs of whitespace, `.` and `-` into a single `-`,
/// drops anything that is not alphanumeric or `_`, and trims separators
/// from both ends. Applying it twice yields the same key.
pub fn normalize(location: &str) -> String {
    let mut key = String::with_capacity(location.len());
    let mut pending_separator = false;

    for c in location.chars() {
        if c.is_whitespace() || c == '-' || c == '.' {
            pending_separator = true;
        } else if c.is_alphanumeric() || c == '_' {
            if pending_separator && !key.is_empty() {
                key.push('-');
            }
            pending_separator = false;
            key.extend(c.to_lowercase().filter(|l| l.is_alphanumeric() || *l == '_'));
        }
    }

    key
}

/// Query value sent to the provider: trimmed, whitespace runs joined by `-`.
pub fn provider_query(location: &str) -> String {
    location.split_whitespace().collect::<Vec<_>>().join("-")
}

/// The location to render, or the default when blank.
pub fn display_location(location: Option<&str>) -> String {
    match location.map(str::trim) {
        Some(l) if !l.is_empty() => l.to_string(),
        _ => DEFAULT_LOCATION.to_string(),
    }
}
