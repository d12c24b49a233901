//! Statement evaluation - the pure core of the authorization gate.
//!
//! Evaluation is a function over the full statement set; statement order
//! never affects the outcome.

use super::model::Statement;
use crate::urn::matches_pattern;

/// Outcome of evaluating a statement set against one (action, URN) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// At least one allow statement matched and no deny did
    Allow,
    /// A deny statement matched; deny is final
    Deny,
    /// No statement matched the request
    NoMatch,
}

/// Evaluates `statements` for `action` on `resource_urn`.
///
/// A statement matches when at least one of its action patterns matches the
/// request action and at least one of its resource patterns matches the
/// target URN. Any matching deny wins over any number of matching allows.
pub fn evaluate_statements(statements: &[Statement], action: &str, resource_urn: &str) -> Decision {
    let mut allowed = false;

    for statement in statements {
        if !statement_matches(statement, action, resource_urn) {
            continue;
        }
        if statement.is_deny() {
            return Decision::Deny;
        }
        allowed = true;
    }

    if allowed {
        Decision::Allow
    } else {
        Decision::NoMatch
    }
}

fn statement_matches(statement: &Statement, action: &str, resource_urn: &str) -> bool {
    statement
        .actions
        .iter()
        .any(|pattern| matches_pattern(pattern, action))
        && statement
            .resources
            .iter()
            .any(|pattern| matches_pattern(pattern, resource_urn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam::policy::{EFFECT_ALLOW, EFFECT_DENY};

    fn allow(actions: &[&str], resources: &[&str]) -> Statement {
        Statement::new(
            EFFECT_ALLOW,
            actions.iter().map(|s| s.to_string()).collect(),
            resources.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn deny(actions: &[&str], resources: &[&str]) -> Statement {
        Statement::new(
            EFFECT_DENY,
            actions.iter().map(|s| s.to_string()).collect(),
            resources.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_allow_on_exact_match() {
        let statements = [allow(&["iam:getUser"], &["urn:iws:iam::user/path/1234"])];
        assert_eq!(
            evaluate_statements(&statements, "iam:getUser", "urn:iws:iam::user/path/1234"),
            Decision::Allow
        );
    }

    #[test]
    fn test_allow_on_pattern_match() {
        let statements = [allow(&["iam:get*"], &["urn:iws:iam:123:policy/path/*"])];
        assert_eq!(
            evaluate_statements(&statements, "iam:getPolicy", "urn:iws:iam:123:policy/path/test"),
            Decision::Allow
        );
    }

    #[test]
    fn test_no_match_on_unrelated_action() {
        let statements = [allow(&["iam:getUser"], &["urn:iws:iam::user/path/*"])];
        assert_eq!(
            evaluate_statements(&statements, "iam:deleteUser", "urn:iws:iam::user/path/1234"),
            Decision::NoMatch
        );
    }

    #[test]
    fn test_no_match_on_unrelated_resource() {
        let statements = [allow(&["iam:getUser"], &["urn:iws:iam::user/path/*"])];
        assert_eq!(
            evaluate_statements(&statements, "iam:getUser", "urn:iws:iam::user/other/1234"),
            Decision::NoMatch
        );
    }

    #[test]
    fn test_deny_overrides_allow() {
        // An explicit deny wins no matter how many allows match
        let statements = [
            allow(&["iam:createPolicy"], &["urn:iws:iam:example:policy/*"]),
            allow(&["iam:*"], &["urn:iws:iam:example:policy/path/*"]),
            deny(
                &["iam:createPolicy"],
                &["urn:iws:iam:example:policy/path/test"],
            ),
        ];
        assert_eq!(
            evaluate_statements(
                &statements,
                "iam:createPolicy",
                "urn:iws:iam:example:policy/path/test"
            ),
            Decision::Deny
        );
    }

    #[test]
    fn test_deny_is_order_independent() {
        let mut statements = vec![
            deny(&["iam:getUser"], &["urn:iws:iam::user/path/*"]),
            allow(&["iam:getUser"], &["urn:iws:iam::user/path/*"]),
        ];
        assert_eq!(
            evaluate_statements(&statements, "iam:getUser", "urn:iws:iam::user/path/1234"),
            Decision::Deny
        );

        statements.reverse();
        assert_eq!(
            evaluate_statements(&statements, "iam:getUser", "urn:iws:iam::user/path/1234"),
            Decision::Deny
        );
    }

    #[test]
    fn test_non_matching_deny_does_not_block() {
        let statements = [
            allow(&["iam:getUser"], &["urn:iws:iam::user/path/*"]),
            deny(&["iam:getUser"], &["urn:iws:iam::user/other/*"]),
        ];
        assert_eq!(
            evaluate_statements(&statements, "iam:getUser", "urn:iws:iam::user/path/1234"),
            Decision::Allow
        );
    }

    #[test]
    fn test_empty_statement_set() {
        assert_eq!(
            evaluate_statements(&[], "iam:getUser", "urn:iws:iam::user/path/1234"),
            Decision::NoMatch
        );
    }
}
