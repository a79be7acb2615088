//! Live-search query shaping.
//!
//! The repositories run the actual `ILIKE` queries; this module owns the
//! rules around them: blank queries short-circuit to nothing, and user
//! input never leaks pattern metacharacters into the match.

/// Normalize a raw `q` parameter. `None` means "do not search at all" -
/// the response is an empty list, not an error and not the whole catalog.
pub fn normalized_query(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Build a `%...%` ILIKE pattern with `%`, `_`, and `\` escaped so the
/// query matches the literal substring.
pub fn contains_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_queries_normalize_to_none() {
        assert_eq!(normalized_query(None), None);
        assert_eq!(normalized_query(Some("")), None);
        assert_eq!(normalized_query(Some("   ")), None);
        assert_eq!(normalized_query(Some(" dune ")), Some("dune".to_string()));
    }

    #[test]
    fn pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("dune"), "%dune%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("back\\slash"), "%back\\\\slash%");
    }
}
