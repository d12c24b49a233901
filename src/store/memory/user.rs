//! User store implementation for `InMemoryIamStore`.

use super::{paginate, InMemoryIamStore};
use crate::error::{IamError, Result};
use crate::iam::{Group, User};
use crate::store::traits::UserStore;
use crate::types::Filter;
use async_trait::async_trait;

#[async_trait]
impl UserStore for InMemoryIamStore {
    async fn add_user(&mut self, user: User) -> Result<User> {
        if self.users.contains_key(&user.external_id) {
            // Mirrors the unique constraint a relational backend would hit
            return Err(IamError::UserAlreadyExist {
                message: format!(
                    "Unable to create user, user with externalId {} already exist",
                    user.external_id
                ),
            });
        }
        self.users.insert(user.external_id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user_by_external_id(&self, external_id: &str) -> Result<Option<User>> {
        Ok(self.users.get(external_id).cloned())
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.values().find(|u| u.id == id).cloned())
    }

    async fn update_user(&mut self, user: User) -> Result<User> {
        self.users.insert(user.external_id.clone(), user.clone());
        Ok(user)
    }

    async fn remove_user(&mut self, external_id: &str) -> Result<()> {
        if let Some(user) = self.users.remove(external_id) {
            // Cascade: memberships reference the stable id
            for members in self.group_members.values_mut() {
                members.retain(|user_id| user_id != &user.id);
            }
        }
        Ok(())
    }

    async fn get_users_filtered(&self, filter: &Filter) -> Result<(Vec<User>, i64)> {
        let mut users: Vec<User> = self.users.values().cloned().collect();

        if let Some(prefix) = &filter.path_prefix {
            users.retain(|user| user.path.starts_with(prefix.as_str()));
        }

        users.sort_by(|a, b| a.external_id.cmp(&b.external_id));
        Ok(paginate(users, filter))
    }

    async fn get_groups_by_user_id(
        &self,
        user_id: &str,
        filter: &Filter,
    ) -> Result<(Vec<Group>, i64)> {
        let mut groups: Vec<Group> = self
            .group_members
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m == user_id))
            .filter_map(|(group_id, _)| self.groups.get(group_id).cloned())
            .collect();

        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(groups, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam::user::builder::build_user;

    #[tokio::test]
    async fn test_add_and_get_user() {
        let mut store = InMemoryIamStore::new();
        let user = build_user("1234".to_string(), "/path/".to_string());
        store.add_user(user.clone()).await.unwrap();

        let found = store.get_user_by_external_id("1234").await.unwrap();
        assert_eq!(found, Some(user.clone()));

        let by_id = store.get_user_by_id(&user.id).await.unwrap();
        assert_eq!(by_id, Some(user));
    }

    #[tokio::test]
    async fn test_add_duplicate_external_id() {
        let mut store = InMemoryIamStore::new();
        store
            .add_user(build_user("1234".to_string(), "/path/".to_string()))
            .await
            .unwrap();

        let err = store
            .add_user(build_user("1234".to_string(), "/other/".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, IamError::UserAlreadyExist { .. }));
    }

    #[tokio::test]
    async fn test_get_users_filtered_by_path_prefix() {
        let mut store = InMemoryIamStore::new();
        store
            .add_user(build_user("a".to_string(), "/path/".to_string()))
            .await
            .unwrap();
        store
            .add_user(build_user("b".to_string(), "/other/".to_string()))
            .await
            .unwrap();

        let filter = Filter {
            path_prefix: Some("/path/".to_string()),
            ..Default::default()
        };
        let (users, total) = store.get_users_filtered(&filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(users[0].external_id, "a");
    }

    #[tokio::test]
    async fn test_remove_user_drops_memberships() {
        let mut store = InMemoryIamStore::new();
        let user = build_user("1234".to_string(), "/path/".to_string());
        store.add_user(user.clone()).await.unwrap();
        store
            .group_members
            .insert("g1".to_string(), vec![user.id.clone()]);

        store.remove_user("1234").await.unwrap();
        assert!(store.group_members.get("g1").unwrap().is_empty());
        assert!(store.get_user_by_external_id("1234").await.unwrap().is_none());
    }
}
