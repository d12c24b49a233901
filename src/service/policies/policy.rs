//! Policy Service
//!
//! Administrative operations over policies. Policies are IAM objects like
//! any other: creating, reading, renaming or deleting one is gated on the
//! caller's own effective policy set against the policy's URN.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::context::RequestContext;
use crate::error::{IamError, Result};
use crate::iam::actions::{
    POLICY_ACTION_CREATE_POLICY, POLICY_ACTION_DELETE_POLICY, POLICY_ACTION_GET_POLICY,
    POLICY_ACTION_LIST_ATTACHED_GROUPS, POLICY_ACTION_LIST_POLICIES, POLICY_ACTION_UPDATE_POLICY,
};
use crate::iam::policy::{
    builder as policy_builder, AddPolicyRequest, Policy, UpdatePolicyRequest,
};
use crate::iam::Group;
use crate::service::auth::AuthorizationService;
use crate::store::traits::{GroupStore, PolicyStore, UserStore};
use crate::types::Filter;
use crate::urn::{ResourceKind, Urn};
use crate::validation;

/// Service for managing policies.
pub struct PolicyService<S>
where
    S: UserStore + GroupStore + PolicyStore,
{
    store: Arc<RwLock<S>>,
    authorizer: AuthorizationService<S>,
}

impl<S> PolicyService<S>
where
    S: UserStore + GroupStore + PolicyStore,
{
    pub fn new(store: Arc<RwLock<S>>) -> Self {
        Self {
            authorizer: AuthorizationService::new(store.clone()),
            store,
        }
    }

    async fn lookup_policy(&self, org: &str, name: &str) -> Result<Policy> {
        let store = self.store.read().await;
        store
            .get_policy_by_name(org, name)
            .await?
            .ok_or_else(|| IamError::PolicyNotFound {
                message: format!("Policy with org {} and name {} not found", org, name),
            })
    }

    /// Creates a policy with its statements.
    pub async fn add_policy(
        &self,
        ctx: &RequestContext,
        request: AddPolicyRequest,
    ) -> Result<Policy> {
        validation::validate_org(&request.org)?;
        validation::validate_name("name", &request.name)?;
        validation::validate_path("path", &request.path)?;
        validation::validate_statements(&request.statements)?;

        let urn = Urn::new(
            request.org.clone(),
            ResourceKind::Policy,
            request.path.clone(),
            request.name.clone(),
        )
        .to_string();

        let existing = {
            let store = self.store.read().await;
            store.get_policy_by_name(&request.org, &request.name).await?
        };
        if existing.is_some() {
            return Err(IamError::PolicyAlreadyExist {
                message: format!(
                    "Unable to create policy, policy with org {} and name {} already exist",
                    request.org, request.name
                ),
            });
        }

        self.authorizer
            .authorize_resource(ctx, POLICY_ACTION_CREATE_POLICY, &urn)
            .await?;

        let policy = policy_builder::build_policy(
            request.org,
            request.name,
            request.path,
            request.statements,
        );
        log::debug!("creating policy {}", policy.urn);
        let mut store = self.store.write().await;
        store.add_policy(policy).await
    }

    /// Fetches a policy by org and name, statements included.
    pub async fn get_policy_by_name(
        &self,
        ctx: &RequestContext,
        org: &str,
        name: &str,
    ) -> Result<Policy> {
        validation::validate_org(org)?;
        validation::validate_name("name", name)?;

        let policy = self.lookup_policy(org, name).await?;
        self.authorizer
            .authorize_resource(ctx, POLICY_ACTION_GET_POLICY, &policy.urn)
            .await?;
        Ok(policy)
    }

    /// Lists policies, pruned to those the caller may list. The returned
    /// total is the repository total for admin callers and the pruned count
    /// otherwise.
    pub async fn list_policies(
        &self,
        ctx: &RequestContext,
        filter: &Filter,
    ) -> Result<(Vec<Policy>, i64)> {
        validation::validate_filter(filter)?;

        let (policies, total) = {
            let store = self.store.read().await;
            store.get_policies_filtered(filter).await?
        };

        if ctx.is_admin() {
            return Ok((policies, total));
        }

        let urns: Vec<String> = policies.iter().map(|p| p.urn.clone()).collect();
        let allowed = self
            .authorizer
            .filter_authorized_resources(ctx, POLICY_ACTION_LIST_POLICIES, &urns)
            .await?;
        let policies: Vec<Policy> = policies
            .into_iter()
            .filter(|p| allowed.contains(&p.urn))
            .collect();
        let total = policies.len() as i64;
        Ok((policies, total))
    }

    /// Renames, moves or rewrites a policy.
    ///
    /// The gate runs twice on a rename: once for the URN being left behind
    /// and once for the URN about to exist, with the collision check in
    /// between.
    pub async fn update_policy(
        &self,
        ctx: &RequestContext,
        request: UpdatePolicyRequest,
    ) -> Result<Policy> {
        validation::validate_org(&request.org)?;
        validation::validate_name("name", &request.name)?;
        if let Some(new_name) = &request.new_name {
            validation::validate_name("new name", new_name)?;
        }
        if let Some(new_path) = &request.new_path {
            validation::validate_path("new path", new_path)?;
        }
        if let Some(new_statements) = &request.new_statements {
            validation::validate_statements(new_statements)?;
        }

        let policy = self.lookup_policy(&request.org, &request.name).await?;

        self.authorizer
            .authorize_resource(ctx, POLICY_ACTION_UPDATE_POLICY, &policy.urn)
            .await?;

        let new_name = request.new_name.unwrap_or_else(|| policy.name.clone());
        let new_path = request.new_path.unwrap_or_else(|| policy.path.clone());
        let new_statements = request
            .new_statements
            .unwrap_or_else(|| policy.statements.clone());
        let renamed = new_name != policy.name || new_path != policy.path;

        if renamed {
            let occupant = {
                let store = self.store.read().await;
                store.get_policy_by_name(&request.org, &new_name).await?
            };
            if occupant.is_some_and(|p| p.id != policy.id) {
                return Err(IamError::PolicyAlreadyExist {
                    message: format!("Policy name: {} already exists", new_name),
                });
            }
        }

        let updated = policy_builder::update_policy(policy, new_name, new_path, new_statements);
        if renamed {
            self.authorizer
                .authorize_resource(ctx, POLICY_ACTION_UPDATE_POLICY, &updated.urn)
                .await?;
        }

        let mut store = self.store.write().await;
        store.update_policy(updated).await
    }

    /// Deletes a policy; statements and attachments cascade away.
    pub async fn remove_policy(&self, ctx: &RequestContext, org: &str, name: &str) -> Result<()> {
        validation::validate_org(org)?;
        validation::validate_name("name", name)?;

        let policy = self.lookup_policy(org, name).await?;
        self.authorizer
            .authorize_resource(ctx, POLICY_ACTION_DELETE_POLICY, &policy.urn)
            .await?;

        log::debug!("removing policy {}", policy.urn);
        let mut store = self.store.write().await;
        store.remove_policy(&policy.id).await
    }

    /// Lists the groups a policy is attached to. Gated on the policy URN.
    pub async fn list_attached_groups(
        &self,
        ctx: &RequestContext,
        org: &str,
        name: &str,
        filter: &Filter,
    ) -> Result<(Vec<Group>, i64)> {
        validation::validate_org(org)?;
        validation::validate_name("name", name)?;
        validation::validate_filter(filter)?;

        let policy = self.lookup_policy(org, name).await?;
        self.authorizer
            .authorize_resource(ctx, POLICY_ACTION_LIST_ATTACHED_GROUPS, &policy.urn)
            .await?;

        let store = self.store.read().await;
        store.get_attached_groups(&policy.id, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iam::policy::{Statement, EFFECT_ALLOW};
    use crate::store::memory::InMemoryIamStore;

    fn admin() -> RequestContext {
        RequestContext::new("123456", true)
    }

    fn setup() -> PolicyService<InMemoryIamStore> {
        PolicyService::new(Arc::new(RwLock::new(InMemoryIamStore::new())))
    }

    fn statements() -> Vec<Statement> {
        vec![Statement::new(
            EFFECT_ALLOW,
            vec!["iam:getUser".to_string()],
            vec!["urn:iws:iam::user/path/*".to_string()],
        )]
    }

    fn add_request(org: &str, name: &str, path: &str) -> AddPolicyRequest {
        AddPolicyRequest {
            org: org.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            statements: statements(),
        }
    }

    #[tokio::test]
    async fn test_add_policy_derives_urn() {
        let service = setup();
        let policy = service
            .add_policy(&admin(), add_request("123", "test", "/path/"))
            .await
            .unwrap();
        assert_eq!(policy.urn, "urn:iws:iam:123:policy/path/test");
        assert_eq!(policy.statements, statements());
    }

    #[tokio::test]
    async fn test_add_policy_already_exists() {
        let service = setup();
        service
            .add_policy(&admin(), add_request("123", "test", "/path/"))
            .await
            .unwrap();

        let err = service
            .add_policy(&admin(), add_request("123", "test", "/path/"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to create policy, policy with org 123 and name test already exist"
        );
    }

    #[tokio::test]
    async fn test_add_policy_bad_name() {
        let service = setup();
        let err = service
            .add_policy(&admin(), add_request("123", "**!^#~", "/path/"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameter: name **!^#~");
    }

    #[tokio::test]
    async fn test_add_policy_bad_effect() {
        let service = setup();
        let mut request = add_request("123", "test", "/path/");
        request.statements[0].effect = "foobar".to_string();

        let err = service.add_policy(&admin(), request).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid effect: foobar - Only 'allow' and 'deny' accepted"
        );
    }

    #[tokio::test]
    async fn test_get_policy_not_found() {
        let service = setup();
        let err = service
            .get_policy_by_name(&admin(), "123", "ghost")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Policy with org 123 and name ghost not found"
        );
    }

    #[tokio::test]
    async fn test_update_policy_rename() {
        let service = setup();
        service
            .add_policy(&admin(), add_request("123", "test", "/path/"))
            .await
            .unwrap();

        let updated = service
            .update_policy(
                &admin(),
                UpdatePolicyRequest {
                    org: "123".to_string(),
                    name: "test".to_string(),
                    new_name: Some("test2".to_string()),
                    new_path: Some("/path2/".to_string()),
                    new_statements: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.urn, "urn:iws:iam:123:policy/path2/test2");
        // Statements survive a pure rename
        assert_eq!(updated.statements, statements());

        // The old name is free again
        service
            .add_policy(&admin(), add_request("123", "test", "/path/"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_policy_rename_collision() {
        let service = setup();
        service
            .add_policy(&admin(), add_request("123", "test", "/path/"))
            .await
            .unwrap();
        service
            .add_policy(&admin(), add_request("123", "test2", "/path/"))
            .await
            .unwrap();

        let err = service
            .update_policy(
                &admin(),
                UpdatePolicyRequest {
                    org: "123".to_string(),
                    name: "test".to_string(),
                    new_name: Some("test2".to_string()),
                    new_path: Some("/path2/".to_string()),
                    new_statements: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Policy name: test2 already exists");
    }

    #[tokio::test]
    async fn test_update_policy_statements_only() {
        let service = setup();
        service
            .add_policy(&admin(), add_request("123", "test", "/path/"))
            .await
            .unwrap();

        let new_statements = vec![Statement::new(
            EFFECT_ALLOW,
            vec!["iam:listUsers".to_string()],
            vec!["urn:iws:iam::user/*".to_string()],
        )];
        let updated = service
            .update_policy(
                &admin(),
                UpdatePolicyRequest {
                    org: "123".to_string(),
                    name: "test".to_string(),
                    new_name: None,
                    new_path: None,
                    new_statements: Some(new_statements.clone()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.urn, "urn:iws:iam:123:policy/path/test");
        assert_eq!(updated.statements, new_statements);
    }

    #[tokio::test]
    async fn test_remove_policy() {
        let service = setup();
        service
            .add_policy(&admin(), add_request("123", "test", "/path/"))
            .await
            .unwrap();

        service.remove_policy(&admin(), "123", "test").await.unwrap();
        let err = service
            .get_policy_by_name(&admin(), "123", "test")
            .await
            .unwrap_err();
        assert!(matches!(err, IamError::PolicyNotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_policies_admin_total() {
        let service = setup();
        for name in ["a", "b", "c"] {
            service
                .add_policy(&admin(), add_request("123", name, "/path/"))
                .await
                .unwrap();
        }

        let filter = Filter {
            limit: 2,
            ..Default::default()
        };
        let (page, total) = service.list_policies(&admin(), &filter).await.unwrap();
        assert_eq!(page.len(), 2);
        // Admin sees the repository total before paging
        assert_eq!(total, 3);
    }
}
