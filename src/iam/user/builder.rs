//! Pure construction and update helpers for users.

use chrono::Utc;
use uuid::Uuid;

use super::model::User;
use crate::urn::{ResourceKind, Urn};

/// Builds a new user; the URN is derived from path and external id.
pub fn build_user(external_id: String, path: String) -> User {
    let urn = Urn::new("", ResourceKind::User, path.clone(), external_id.clone()).to_string();
    let now = Utc::now();
    User {
        id: Uuid::new_v4().to_string(),
        external_id,
        path,
        urn,
        create_at: now,
        update_at: now,
    }
}

/// Moves a user to a new path, rewriting the URN.
pub fn update_user(user: User, new_path: String) -> User {
    let urn = Urn::new(
        "",
        ResourceKind::User,
        new_path.clone(),
        user.external_id.clone(),
    )
    .to_string();
    User {
        path: new_path,
        urn,
        update_at: Utc::now(),
        ..user
    }
}
