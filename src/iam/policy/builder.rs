//! Pure construction and update helpers for policies.

use chrono::Utc;
use uuid::Uuid;

use super::model::{Policy, Statement};
use crate::urn::{ResourceKind, Urn};

/// Builds a new policy with a fresh id and a URN derived from org, path
/// and name.
pub fn build_policy(org: String, name: String, path: String, statements: Vec<Statement>) -> Policy {
    let urn = Urn::new(org.clone(), ResourceKind::Policy, path.clone(), name.clone()).to_string();
    let now = Utc::now();
    Policy {
        id: Uuid::new_v4().to_string(),
        name,
        org,
        path,
        urn,
        create_at: now,
        update_at: now,
        statements,
    }
}

/// Applies a rename/move/statement change, rewriting the URN to stay
/// derivable from the new fields.
pub fn update_policy(
    policy: Policy,
    new_name: String,
    new_path: String,
    new_statements: Vec<Statement>,
) -> Policy {
    let urn = Urn::new(
        policy.org.clone(),
        ResourceKind::Policy,
        new_path.clone(),
        new_name.clone(),
    )
    .to_string();
    Policy {
        name: new_name,
        path: new_path,
        urn,
        update_at: Utc::now(),
        statements: new_statements,
        ..policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam::policy::EFFECT_ALLOW;

    fn statements() -> Vec<Statement> {
        vec![Statement::new(
            EFFECT_ALLOW,
            vec!["iam:getUser".to_string()],
            vec!["urn:iws:iam::user/path/*".to_string()],
        )]
    }

    #[test]
    fn test_build_policy_derives_urn() {
        let policy = build_policy(
            "123".to_string(),
            "test".to_string(),
            "/path/".to_string(),
            statements(),
        );
        assert_eq!(policy.urn, "urn:iws:iam:123:policy/path/test");
        assert!(!policy.id.is_empty());
        assert_eq!(policy.create_at, policy.update_at);
    }

    #[test]
    fn test_update_policy_rewrites_urn() {
        let policy = build_policy(
            "123".to_string(),
            "test".to_string(),
            "/path/".to_string(),
            statements(),
        );
        let id = policy.id.clone();
        let created = policy.create_at;

        let updated = update_policy(
            policy,
            "test2".to_string(),
            "/path2/".to_string(),
            statements(),
        );
        assert_eq!(updated.urn, "urn:iws:iam:123:policy/path2/test2");
        assert_eq!(updated.id, id);
        assert_eq!(updated.create_at, created);
        assert!(updated.update_at >= created);
    }
}
