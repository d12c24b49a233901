//! Input validation for every administrative operation.
//!
//! All checks are anchored on fixed regular expressions; every rejection is an
//! `InvalidParameter` whose message names the offending field and value, so
//! the messages here are part of the boundary contract.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{IamError, Result};
use crate::iam::policy::{Statement, EFFECT_ALLOW, EFFECT_DENY};
use crate::types::{Filter, MAX_LIMIT};

lazy_static! {
    static ref NAME_REGEX: Regex = Regex::new(r"^[\w\-]+$").expect("a valid regex");
    static ref ORG_REGEX: Regex = Regex::new(r"^[\w\-]+$").expect("a valid regex");
    static ref EXTERNAL_ID_REGEX: Regex = Regex::new(r"^[\w+=,.@\-]+$").expect("a valid regex");
    static ref PATH_REGEX: Regex = Regex::new(r"^(/[\w+=,.@-]+)*/$").expect("a valid regex");
    static ref ACTION_REGEX: Regex = Regex::new(r"^[\w\-*]+:[\w\-*]+$").expect("a valid regex");
    static ref RESOURCE_REGEX: Regex =
        Regex::new(r"^urn:iws:iam:(\*|[\w\-]*):[\w\-*]+[\w/+=,.@\-*]*$").expect("a valid regex");
    static ref URN_TEMPLATE_REGEX: Regex =
        Regex::new(r"^urn:iws:iam:[\w\-]*:[\w\-]+[\w/+=,.@\-{}]*$").expect("a valid regex");
}

/// HTTP verbs a proxy resource may route.
const ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "PATCH"];

fn invalid(message: String) -> IamError {
    IamError::InvalidParameter { message }
}

/// Validates a resource name. `field` names the parameter in the message
/// ("name", "new name", ...).
pub fn validate_name(field: &str, name: &str) -> Result<()> {
    if !NAME_REGEX.is_match(name) {
        return Err(invalid(format!("Invalid parameter: {field} {name}")));
    }
    Ok(())
}

/// Validates an organization identifier.
pub fn validate_org(org: &str) -> Result<()> {
    if !ORG_REGEX.is_match(org) {
        return Err(invalid(format!("Invalid parameter: org {org}")));
    }
    Ok(())
}

/// Validates a user external identifier.
pub fn validate_external_id(field: &str, external_id: &str) -> Result<()> {
    if !EXTERNAL_ID_REGEX.is_match(external_id) {
        return Err(invalid(format!("Invalid parameter: {field} {external_id}")));
    }
    Ok(())
}

/// Validates a hierarchical path. Paths start and end with `/`.
pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if !PATH_REGEX.is_match(path) {
        return Err(invalid(format!("Invalid parameter: {field} {path}")));
    }
    Ok(())
}

/// Validates a statement effect: only `allow` and `deny` are accepted.
pub fn validate_effect(effect: &str) -> Result<()> {
    if effect != EFFECT_ALLOW && effect != EFFECT_DENY {
        return Err(invalid(format!(
            "Invalid effect: {effect} - Only 'allow' and 'deny' accepted"
        )));
    }
    Ok(())
}

/// Validates an action string (`service:operation`, `*` allowed).
pub fn validate_action(action: &str) -> Result<()> {
    if !ACTION_REGEX.is_match(action) {
        return Err(invalid(format!("Invalid parameter: action {action}")));
    }
    Ok(())
}

/// Validates a resource string: a literal URN, possibly carrying `*`.
pub fn validate_resource(resource: &str) -> Result<()> {
    if !RESOURCE_REGEX.is_match(resource) {
        return Err(invalid(format!("Invalid parameter: resource {resource}")));
    }
    Ok(())
}

/// Validates an ordered statement list: non-empty, each statement with a
/// known effect and non-empty action and resource lists.
pub fn validate_statements(statements: &[Statement]) -> Result<()> {
    if statements.is_empty() {
        return Err(invalid("Empty statements".to_string()));
    }
    for statement in statements {
        validate_effect(&statement.effect)?;
        if statement.actions.is_empty() {
            return Err(invalid("Empty actions".to_string()));
        }
        if statement.resources.is_empty() {
            return Err(invalid("Empty resources".to_string()));
        }
        for action in &statement.actions {
            validate_action(action)?;
        }
        for resource in &statement.resources {
            validate_resource(resource)?;
        }
    }
    Ok(())
}

/// Validates an HTTP method for proxy resources.
pub fn validate_method(method: &str) -> Result<()> {
    if !ALLOWED_METHODS.contains(&method) {
        return Err(invalid(format!("Invalid parameter: method {method}")));
    }
    Ok(())
}

/// Validates a proxy URN template. Templates look like URNs with `{var}`
/// placeholders in the path segment.
pub fn validate_urn_template(template: &str) -> Result<()> {
    if !URN_TEMPLATE_REGEX.is_match(template) {
        return Err(invalid(format!("Invalid parameter: urnTemplate {template}")));
    }
    Ok(())
}

/// Validates a list filter: bounds plus the optional prefix and org.
pub fn validate_filter(filter: &Filter) -> Result<()> {
    if filter.offset < 0 {
        return Err(invalid(format!("Invalid parameter: Offset {}", filter.offset)));
    }
    if filter.limit < 0 || filter.limit > MAX_LIMIT {
        return Err(invalid(format!(
            "Invalid parameter: Limit {}, max limit allowed: {}",
            filter.limit, MAX_LIMIT
        )));
    }
    if let Some(path_prefix) = &filter.path_prefix {
        if !PATH_REGEX.is_match(path_prefix) {
            return Err(invalid(format!(
                "Invalid parameter: PathPrefix {path_prefix}"
            )));
        }
    }
    if let Some(org) = &filter.org {
        validate_org(org)?;
    }
    Ok(())
}
