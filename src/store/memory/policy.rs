//! Policy store implementation for `InMemoryIamStore`.

use super::{paginate, InMemoryIamStore};
use crate::error::{IamError, Result};
use crate::iam::{Group, Policy};
use crate::store::traits::PolicyStore;
use crate::types::Filter;
use async_trait::async_trait;

#[async_trait]
impl PolicyStore for InMemoryIamStore {
    async fn add_policy(&mut self, policy: Policy) -> Result<Policy> {
        let taken = self
            .policies
            .values()
            .any(|p| p.org == policy.org && p.name == policy.name);
        if taken {
            return Err(IamError::PolicyAlreadyExist {
                message: format!(
                    "Unable to create policy, policy with org {} and name {} already exist",
                    policy.org, policy.name
                ),
            });
        }
        self.policies.insert(policy.id.clone(), policy.clone());
        Ok(policy)
    }

    async fn get_policy_by_name(&self, org: &str, name: &str) -> Result<Option<Policy>> {
        Ok(self
            .policies
            .values()
            .find(|p| p.org == org && p.name == name)
            .cloned())
    }

    async fn get_policy_by_id(&self, id: &str) -> Result<Option<Policy>> {
        Ok(self.policies.get(id).cloned())
    }

    async fn update_policy(&mut self, policy: Policy) -> Result<Policy> {
        self.policies.insert(policy.id.clone(), policy.clone());
        Ok(policy)
    }

    async fn remove_policy(&mut self, id: &str) -> Result<()> {
        self.policies.remove(id);
        // Cascade: attachments die with the policy
        for attached in self.group_policies.values_mut() {
            attached.retain(|policy_id| policy_id != id);
        }
        Ok(())
    }

    async fn get_policies_filtered(&self, filter: &Filter) -> Result<(Vec<Policy>, i64)> {
        let mut policies: Vec<Policy> = self.policies.values().cloned().collect();

        if let Some(org) = &filter.org {
            policies.retain(|policy| &policy.org == org);
        }
        if let Some(prefix) = &filter.path_prefix {
            policies.retain(|policy| policy.path.starts_with(prefix.as_str()));
        }

        policies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(policies, filter))
    }

    async fn attach_policy(&mut self, group_id: &str, policy_id: &str) -> Result<()> {
        let attached = self.group_policies.entry(group_id.to_string()).or_default();
        if !attached.iter().any(|p| p == policy_id) {
            attached.push(policy_id.to_string());
        }
        Ok(())
    }

    async fn detach_policy(&mut self, group_id: &str, policy_id: &str) -> Result<()> {
        if let Some(attached) = self.group_policies.get_mut(group_id) {
            attached.retain(|p| p != policy_id);
        }
        Ok(())
    }

    async fn is_attached_to_group(&self, group_id: &str, policy_id: &str) -> Result<bool> {
        Ok(self
            .group_policies
            .get(group_id)
            .map(|attached| attached.iter().any(|p| p == policy_id))
            .unwrap_or(false))
    }

    async fn get_attached_policies(
        &self,
        group_id: &str,
        filter: &Filter,
    ) -> Result<(Vec<Policy>, i64)> {
        let mut policies: Vec<Policy> = self
            .group_policies
            .get(group_id)
            .map(|attached| {
                self.policies
                    .values()
                    .filter(|p| attached.iter().any(|id| id == &p.id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        policies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(policies, filter))
    }

    async fn get_attached_groups(
        &self,
        policy_id: &str,
        filter: &Filter,
    ) -> Result<(Vec<Group>, i64)> {
        let mut groups: Vec<Group> = self
            .group_policies
            .iter()
            .filter(|(_, attached)| attached.iter().any(|id| id == policy_id))
            .filter_map(|(group_id, _)| self.groups.get(group_id).cloned())
            .collect();

        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(groups, filter))
    }
}
