//! Policy Store Trait

use crate::error::Result;
use crate::iam::{Group, Policy};
use crate::types::Filter;
use async_trait::async_trait;

/// Store trait for policies and the group attachment relation.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Persist a new policy with its statements. Fails when `(org, name)`
    /// is taken.
    async fn add_policy(&mut self, policy: Policy) -> Result<Policy>;

    /// Look up a policy by org and name, statements included.
    async fn get_policy_by_name(&self, org: &str, name: &str) -> Result<Option<Policy>>;

    /// Look up a policy by stable id.
    async fn get_policy_by_id(&self, id: &str) -> Result<Option<Policy>>;

    /// Replace a stored policy and its statements.
    async fn update_policy(&mut self, policy: Policy) -> Result<Policy>;

    /// Delete a policy, its statements and its attachments.
    async fn remove_policy(&mut self, id: &str) -> Result<()>;

    /// List policies matching the filter; returns the page plus the total
    /// before paging.
    async fn get_policies_filtered(&self, filter: &Filter) -> Result<(Vec<Policy>, i64)>;

    /// Record an attachment. Both ends must already exist.
    async fn attach_policy(&mut self, group_id: &str, policy_id: &str) -> Result<()>;

    /// Drop an attachment.
    async fn detach_policy(&mut self, group_id: &str, policy_id: &str) -> Result<()>;

    /// Whether the policy is attached to the group.
    async fn is_attached_to_group(&self, group_id: &str, policy_id: &str) -> Result<bool>;

    /// List the policies attached to a group.
    async fn get_attached_policies(
        &self,
        group_id: &str,
        filter: &Filter,
    ) -> Result<(Vec<Policy>, i64)>;

    /// List the groups a policy is attached to.
    async fn get_attached_groups(
        &self,
        policy_id: &str,
        filter: &Filter,
    ) -> Result<(Vec<Group>, i64)>;
}
