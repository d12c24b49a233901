//! Pure construction and update helpers for groups.

use chrono::Utc;
use uuid::Uuid;

use super::model::Group;
use crate::urn::{ResourceKind, Urn};

/// Builds a new group with a URN derived from org, path and name.
pub fn build_group(org: String, name: String, path: String) -> Group {
    let urn = Urn::new(org.clone(), ResourceKind::Group, path.clone(), name.clone()).to_string();
    let now = Utc::now();
    Group {
        id: Uuid::new_v4().to_string(),
        name,
        org,
        path,
        urn,
        create_at: now,
        update_at: now,
    }
}

/// Applies a rename/move, rewriting the URN.
pub fn update_group(group: Group, new_name: String, new_path: String) -> Group {
    let urn = Urn::new(
        group.org.clone(),
        ResourceKind::Group,
        new_path.clone(),
        new_name.clone(),
    )
    .to_string();
    Group {
        name: new_name,
        path: new_path,
        urn,
        update_at: Utc::now(),
        ..group
    }
}
