//! User Store Trait

use crate::error::Result;
use crate::iam::{Group, User};
use crate::types::Filter;
use async_trait::async_trait;

/// Store trait for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. Fails when the external id is taken.
    async fn add_user(&mut self, user: User) -> Result<User>;

    /// Look up a user by external id.
    async fn get_user_by_external_id(&self, external_id: &str) -> Result<Option<User>>;

    /// Look up a user by stable id.
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Replace a stored user.
    async fn update_user(&mut self, user: User) -> Result<User>;

    /// Delete a user and its group memberships.
    async fn remove_user(&mut self, external_id: &str) -> Result<()>;

    /// List users matching the filter; returns the page plus the total
    /// before paging.
    async fn get_users_filtered(&self, filter: &Filter) -> Result<(Vec<User>, i64)>;

    /// List the groups a user belongs to.
    async fn get_groups_by_user_id(
        &self,
        user_id: &str,
        filter: &Filter,
    ) -> Result<(Vec<Group>, i64)>;
}
