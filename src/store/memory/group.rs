//! Group store implementation for `InMemoryIamStore`.

use super::{paginate, InMemoryIamStore};
use crate::error::{IamError, Result};
use crate::iam::{Group, User};
use crate::store::traits::GroupStore;
use crate::types::Filter;
use async_trait::async_trait;

#[async_trait]
impl GroupStore for InMemoryIamStore {
    async fn add_group(&mut self, group: Group) -> Result<Group> {
        let taken = self
            .groups
            .values()
            .any(|g| g.org == group.org && g.name == group.name);
        if taken {
            return Err(IamError::GroupAlreadyExist {
                message: format!(
                    "Unable to create group, group with org {} and name {} already exist",
                    group.org, group.name
                ),
            });
        }
        self.groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn get_group_by_name(&self, org: &str, name: &str) -> Result<Option<Group>> {
        Ok(self
            .groups
            .values()
            .find(|g| g.org == org && g.name == name)
            .cloned())
    }

    async fn get_group_by_id(&self, id: &str) -> Result<Option<Group>> {
        Ok(self.groups.get(id).cloned())
    }

    async fn update_group(&mut self, group: Group) -> Result<Group> {
        self.groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    async fn remove_group(&mut self, id: &str) -> Result<()> {
        self.groups.remove(id);
        // Cascade: memberships and attachments die with the group
        self.group_members.remove(id);
        self.group_policies.remove(id);
        Ok(())
    }

    async fn get_groups_filtered(&self, filter: &Filter) -> Result<(Vec<Group>, i64)> {
        let mut groups: Vec<Group> = self.groups.values().cloned().collect();

        if let Some(org) = &filter.org {
            groups.retain(|group| &group.org == org);
        }
        if let Some(prefix) = &filter.path_prefix {
            groups.retain(|group| group.path.starts_with(prefix.as_str()));
        }

        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(groups, filter))
    }

    async fn add_member(&mut self, user_id: &str, group_id: &str) -> Result<()> {
        let members = self.group_members.entry(group_id.to_string()).or_default();
        if !members.iter().any(|m| m == user_id) {
            members.push(user_id.to_string());
        }
        Ok(())
    }

    async fn remove_member(&mut self, user_id: &str, group_id: &str) -> Result<()> {
        if let Some(members) = self.group_members.get_mut(group_id) {
            members.retain(|m| m != user_id);
        }
        Ok(())
    }

    async fn is_member_of_group(&self, user_id: &str, group_id: &str) -> Result<bool> {
        Ok(self
            .group_members
            .get(group_id)
            .map(|members| members.iter().any(|m| m == user_id))
            .unwrap_or(false))
    }

    async fn get_group_members(
        &self,
        group_id: &str,
        filter: &Filter,
    ) -> Result<(Vec<User>, i64)> {
        let mut users: Vec<User> = self
            .group_members
            .get(group_id)
            .map(|members| {
                self.users
                    .values()
                    .filter(|u| members.iter().any(|m| m == &u.id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        users.sort_by(|a, b| a.external_id.cmp(&b.external_id));
        Ok(paginate(users, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam::group::builder::build_group;
    use crate::iam::user::builder::build_user;
    use crate::store::traits::UserStore;

    #[tokio::test]
    async fn test_add_duplicate_org_name() {
        let mut store = InMemoryIamStore::new();
        store
            .add_group(build_group(
                "example".to_string(),
                "ops".to_string(),
                "/".to_string(),
            ))
            .await
            .unwrap();

        let err = store
            .add_group(build_group(
                "example".to_string(),
                "ops".to_string(),
                "/other/".to_string(),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, IamError::GroupAlreadyExist { .. }));

        // Same name in another org is fine
        assert!(store
            .add_group(build_group(
                "other".to_string(),
                "ops".to_string(),
                "/".to_string(),
            ))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_membership_round_trip() {
        let mut store = InMemoryIamStore::new();
        let user = build_user("1234".to_string(), "/path/".to_string());
        let group = build_group("example".to_string(), "ops".to_string(), "/".to_string());
        store.add_user(user.clone()).await.unwrap();
        store.add_group(group.clone()).await.unwrap();

        assert!(!store.is_member_of_group(&user.id, &group.id).await.unwrap());
        store.add_member(&user.id, &group.id).await.unwrap();
        assert!(store.is_member_of_group(&user.id, &group.id).await.unwrap());

        let (members, total) = store
            .get_group_members(&group.id, &Filter::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(members[0].external_id, "1234");

        store.remove_member(&user.id, &group.id).await.unwrap();
        assert!(!store.is_member_of_group(&user.id, &group.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_group_cascades() {
        let mut store = InMemoryIamStore::new();
        let group = build_group("example".to_string(), "ops".to_string(), "/".to_string());
        store.add_group(group.clone()).await.unwrap();
        store
            .group_members
            .insert(group.id.clone(), vec!["u1".to_string()]);
        store
            .group_policies
            .insert(group.id.clone(), vec!["p1".to_string()]);

        store.remove_group(&group.id).await.unwrap();
        assert!(store.get_group_by_id(&group.id).await.unwrap().is_none());
        assert!(!store.group_members.contains_key(&group.id));
        assert!(!store.group_policies.contains_key(&group.id));
    }

    #[tokio::test]
    async fn test_get_groups_filtered_by_org() {
        let mut store = InMemoryIamStore::new();
        store
            .add_group(build_group(
                "example".to_string(),
                "ops".to_string(),
                "/".to_string(),
            ))
            .await
            .unwrap();
        store
            .add_group(build_group(
                "other".to_string(),
                "devs".to_string(),
                "/".to_string(),
            ))
            .await
            .unwrap();

        let filter = Filter {
            org: Some("example".to_string()),
            ..Default::default()
        };
        let (groups, total) = store.get_groups_filtered(&filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(groups[0].name, "ops");
    }
}
