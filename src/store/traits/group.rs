//! Group Store Trait

use crate::error::Result;
use crate::iam::{Group, User};
use crate::types::Filter;
use async_trait::async_trait;

/// Store trait for groups and the membership relation.
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Persist a new group. Fails when `(org, name)` is taken.
    async fn add_group(&mut self, group: Group) -> Result<Group>;

    /// Look up a group by org and name.
    async fn get_group_by_name(&self, org: &str, name: &str) -> Result<Option<Group>>;

    /// Look up a group by stable id.
    async fn get_group_by_id(&self, id: &str) -> Result<Option<Group>>;

    /// Replace a stored group.
    async fn update_group(&mut self, group: Group) -> Result<Group>;

    /// Delete a group, its memberships and its policy attachments.
    async fn remove_group(&mut self, id: &str) -> Result<()>;

    /// List groups matching the filter; returns the page plus the total
    /// before paging.
    async fn get_groups_filtered(&self, filter: &Filter) -> Result<(Vec<Group>, i64)>;

    /// Record a membership. Both ends must already exist.
    async fn add_member(&mut self, user_id: &str, group_id: &str) -> Result<()>;

    /// Drop a membership.
    async fn remove_member(&mut self, user_id: &str, group_id: &str) -> Result<()>;

    /// Whether the user belongs to the group.
    async fn is_member_of_group(&self, user_id: &str, group_id: &str) -> Result<bool>;

    /// List the members of a group.
    async fn get_group_members(
        &self,
        group_id: &str,
        filter: &Filter,
    ) -> Result<(Vec<User>, i64)>;
}
