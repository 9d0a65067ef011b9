//! Fuzzy matching for server name suggestions.

use strsim::jaro_winkler;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Minimum similarity threshold for suggestions (0.0 to 1.0).
const MIN_SIMILARITY: f64 = 0.6;

/// Maximum number of suggestions to show.
const MAX_SUGGESTIONS: usize = 3;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Find names similar to `query`, best match first.
pub fn find_similar_names<'a>(query: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&str, f64)> = candidates
        .into_iter()
        .map(|name| (name, jaro_winkler(query, name)))
        .filter(|(_, score)| *score >= MIN_SIMILARITY)
        .collect();

    // Stable sort keeps candidate order for equal scores
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Format suggestions in cargo-style.
///
/// Returns None if no suggestions are available.
pub fn format_suggestions(suggestions: &[String]) -> Option<String> {
    match suggestions.len() {
        0 => None,
        1 => Some(format!("Did you mean `{}`?", suggestions[0])),
        _ => {
            let formatted: Vec<String> = suggestions.iter().map(|s| format!("`{}`", s)).collect();
            Some(format!("Did you mean one of: {}?", formatted.join(", ")))
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SERVERS: [&str; 3] = ["example_http", "example_stdio", "gitlab"];

    #[test]
    fn test_find_similar_names() {
        let suggestions = find_similar_names("gitlb", SERVERS);
        assert_eq!(suggestions.first().map(String::as_str), Some("gitlab"));

        let suggestions = find_similar_names("example_stdin", SERVERS);
        assert_eq!(suggestions[0], "example_stdio");
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
    }

    #[test]
    fn test_no_suggestions() {
        assert!(find_similar_names("zzzzzz", SERVERS).is_empty());
        assert!(find_similar_names("", SERVERS).is_empty());
    }

    #[test]
    fn test_format_suggestions() {
        assert_eq!(format_suggestions(&[]), None);
        assert_eq!(
            format_suggestions(&["gitlab".to_string()]),
            Some("Did you mean `gitlab`?".to_string())
        );
        assert_eq!(
            format_suggestions(&["a".to_string(), "b".to_string()]),
            Some("Did you mean one of: `a`, `b`?".to_string())
        );
    }
}
