//! Glob matching for URN and action patterns.

/// Matches `value` against `pattern`, where `*` stands for any run of
/// characters (including none). A pattern without `*` requires exact
/// equality.
///
/// This is the single matching routine behind both action patterns
/// (`iam:get*`) and resource patterns (`urn:iws:iam:123:policy/path/*`).
///
/// # Examples
///
/// ```
/// use warden::urn::matches_pattern;
///
/// assert!(matches_pattern("urn:iws:iam:123:policy/path/*", "urn:iws:iam:123:policy/path/test"));
/// assert!(matches_pattern("iam:*", "iam:getUser"));
/// assert!(!matches_pattern("iam:getUser", "iam:getGroup"));
/// ```
pub fn matches_pattern(pattern: &str, value: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == value;
    }

    let parts: Vec<&str> = pattern.split('*').collect();
    let mut pos = 0;

    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }

        if i == 0 {
            // Anchored at the start
            if !value.starts_with(part) {
                return false;
            }
            pos = part.len();
        } else if i == parts.len() - 1 {
            // Anchored at the end
            return value.len() >= pos + part.len() && value[pos..].ends_with(part);
        } else {
            // Leftmost occurrence in the remaining text
            match value[pos..].find(part) {
                Some(found) => pos += found + part.len(),
                None => return false,
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_without_wildcard() {
        assert!(matches_pattern("iam:getUser", "iam:getUser"));
        assert!(!matches_pattern("iam:getUser", "iam:getUserX"));
        assert!(!matches_pattern(
            "urn:iws:iam:123:policy/path/test",
            "urn:iws:iam:123:policy/path/"
        ));
    }

    #[test]
    fn test_trailing_wildcard() {
        assert!(matches_pattern(
            "urn:iws:iam:123:policy/path/*",
            "urn:iws:iam:123:policy/path/test"
        ));
        assert!(matches_pattern(
            "urn:iws:iam:123:policy/path/*",
            "urn:iws:iam:123:policy/path/"
        ));
        assert!(!matches_pattern(
            "urn:iws:iam:123:policy/path/*",
            "urn:iws:iam:123:policy/other/test"
        ));
    }

    #[test]
    fn test_leading_wildcard() {
        assert!(matches_pattern("*:getUser", "iam:getUser"));
        assert!(!matches_pattern("*:getUser", "iam:getGroup"));
    }

    #[test]
    fn test_inner_wildcard() {
        assert!(matches_pattern("iam:get*User", "iam:getAdminUser"));
        assert!(matches_pattern("iam:get*User", "iam:getUser"));
        assert!(!matches_pattern("iam:get*User", "iam:getGroup"));
        assert!(matches_pattern(
            "urn:iws:iam:*:policy/path/*",
            "urn:iws:iam:example:policy/path/test"
        ));
    }

    #[test]
    fn test_multiple_wildcards() {
        assert!(matches_pattern("a*b*c", "a-x-b-y-c"));
        assert!(matches_pattern("a*b*c", "abc"));
        assert!(!matches_pattern("a*b*c", "acb"));
    }

    #[test]
    fn test_sole_wildcard() {
        assert!(matches_pattern("*", "anything"));
        assert!(matches_pattern("*", ""));
    }

    #[test]
    fn test_no_overlapping_reuse() {
        // The run matched by one part is not available to the next
        assert!(!matches_pattern("ab*bc", "abc"));
        assert!(matches_pattern("ab*bc", "abbc"));
    }
}
