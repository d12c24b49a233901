//! Proxy Resource Service
//!
//! Proxy resources are administered like every other IAM object; the
//! URL-to-action translation that consumes them lives in the proxy
//! transport, outside this crate.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::context::RequestContext;
use crate::error::{IamError, Result};
use crate::iam::actions::{
    PROXY_ACTION_CREATE_RESOURCE, PROXY_ACTION_DELETE_RESOURCE, PROXY_ACTION_GET_RESOURCE,
    PROXY_ACTION_LIST_RESOURCES, PROXY_ACTION_UPDATE_RESOURCE,
};
use crate::iam::proxy::{
    builder as proxy_builder, AddProxyResourceRequest, ProxyResource, UpdateProxyResourceRequest,
};
use crate::service::auth::AuthorizationService;
use crate::store::traits::{GroupStore, PolicyStore, ProxyResourceStore, UserStore};
use crate::types::Filter;
use crate::urn::{ResourceKind, Urn};
use crate::validation;

/// Service for managing proxy routing records.
pub struct ProxyResourceService<S>
where
    S: UserStore + GroupStore + PolicyStore + ProxyResourceStore,
{
    store: Arc<RwLock<S>>,
    authorizer: AuthorizationService<S>,
}

impl<S> ProxyResourceService<S>
where
    S: UserStore + GroupStore + PolicyStore + ProxyResourceStore,
{
    pub fn new(store: Arc<RwLock<S>>) -> Self {
        Self {
            authorizer: AuthorizationService::new(store.clone()),
            store,
        }
    }

    async fn lookup_resource(&self, org: &str, name: &str) -> Result<ProxyResource> {
        let store = self.store.read().await;
        store
            .get_proxy_resource_by_name(org, name)
            .await?
            .ok_or_else(|| IamError::ProxyResourceNotFound {
                message: format!(
                    "Proxy resource with org {} and name {} not found",
                    org, name
                ),
            })
    }

    fn validate_route(url: &str) -> Result<()> {
        if !url.starts_with('/') {
            return Err(IamError::InvalidParameter {
                message: format!("Invalid parameter: url {url}"),
            });
        }
        Ok(())
    }

    /// Creates a proxy resource.
    pub async fn add_proxy_resource(
        &self,
        ctx: &RequestContext,
        request: AddProxyResourceRequest,
    ) -> Result<ProxyResource> {
        validation::validate_org(&request.org)?;
        validation::validate_name("name", &request.name)?;
        validation::validate_path("path", &request.path)?;
        Self::validate_route(&request.url)?;
        validation::validate_method(&request.method)?;
        validation::validate_urn_template(&request.urn_template)?;
        validation::validate_action(&request.action)?;

        let urn = Urn::new(
            request.org.clone(),
            ResourceKind::Proxy,
            request.path.clone(),
            request.name.clone(),
        )
        .to_string();

        let existing = {
            let store = self.store.read().await;
            store
                .get_proxy_resource_by_name(&request.org, &request.name)
                .await?
        };
        if existing.is_some() {
            return Err(IamError::ProxyResourceAlreadyExist {
                message: format!(
                    "Unable to create proxy resource, proxy resource with org {} and name {} already exist",
                    request.org, request.name
                ),
            });
        }

        self.authorizer
            .authorize_resource(ctx, PROXY_ACTION_CREATE_RESOURCE, &urn)
            .await?;

        let resource = proxy_builder::build_proxy_resource(request);
        log::debug!("creating proxy resource {}", resource.urn);
        let mut store = self.store.write().await;
        store.add_proxy_resource(resource).await
    }

    /// Fetches a proxy resource by org and name.
    pub async fn get_proxy_resource_by_name(
        &self,
        ctx: &RequestContext,
        org: &str,
        name: &str,
    ) -> Result<ProxyResource> {
        validation::validate_org(org)?;
        validation::validate_name("name", name)?;

        let resource = self.lookup_resource(org, name).await?;
        self.authorizer
            .authorize_resource(ctx, PROXY_ACTION_GET_RESOURCE, &resource.urn)
            .await?;
        Ok(resource)
    }

    /// Lists proxy resources, pruned to those the caller may list.
    pub async fn list_proxy_resources(
        &self,
        ctx: &RequestContext,
        filter: &Filter,
    ) -> Result<(Vec<ProxyResource>, i64)> {
        validation::validate_filter(filter)?;

        let (resources, total) = {
            let store = self.store.read().await;
            store.get_proxy_resources_filtered(filter).await?
        };

        if ctx.is_admin() {
            return Ok((resources, total));
        }

        let urns: Vec<String> = resources.iter().map(|r| r.urn.clone()).collect();
        let allowed = self
            .authorizer
            .filter_authorized_resources(ctx, PROXY_ACTION_LIST_RESOURCES, &urns)
            .await?;
        let resources: Vec<ProxyResource> = resources
            .into_iter()
            .filter(|r| allowed.contains(&r.urn))
            .collect();
        let total = resources.len() as i64;
        Ok((resources, total))
    }

    /// Updates a proxy resource; renames re-gate the new URN.
    pub async fn update_proxy_resource(
        &self,
        ctx: &RequestContext,
        request: UpdateProxyResourceRequest,
    ) -> Result<ProxyResource> {
        validation::validate_org(&request.org)?;
        validation::validate_name("name", &request.name)?;
        if let Some(new_name) = &request.new_name {
            validation::validate_name("new name", new_name)?;
        }
        if let Some(new_path) = &request.new_path {
            validation::validate_path("new path", new_path)?;
        }
        if let Some(new_url) = &request.new_url {
            Self::validate_route(new_url)?;
        }
        if let Some(new_method) = &request.new_method {
            validation::validate_method(new_method)?;
        }
        if let Some(new_urn_template) = &request.new_urn_template {
            validation::validate_urn_template(new_urn_template)?;
        }
        if let Some(new_action) = &request.new_action {
            validation::validate_action(new_action)?;
        }

        let resource = self.lookup_resource(&request.org, &request.name).await?;

        self.authorizer
            .authorize_resource(ctx, PROXY_ACTION_UPDATE_RESOURCE, &resource.urn)
            .await?;

        let new_name = request.new_name.unwrap_or_else(|| resource.name.clone());
        let new_path = request.new_path.unwrap_or_else(|| resource.path.clone());
        let renamed = new_name != resource.name || new_path != resource.path;

        if renamed {
            let occupant = {
                let store = self.store.read().await;
                store
                    .get_proxy_resource_by_name(&request.org, &new_name)
                    .await?
            };
            if occupant.is_some_and(|r| r.id != resource.id) {
                return Err(IamError::ProxyResourceAlreadyExist {
                    message: format!("Proxy resource name: {} already exists", new_name),
                });
            }
        }

        let updated = proxy_builder::update_proxy_resource(
            resource.clone(),
            new_name,
            new_path,
            request.new_host.unwrap_or_else(|| resource.host.clone()),
            request.new_url.unwrap_or_else(|| resource.url.clone()),
            request.new_method.unwrap_or_else(|| resource.method.clone()),
            request
                .new_urn_template
                .unwrap_or_else(|| resource.urn_template.clone()),
            request.new_action.unwrap_or_else(|| resource.action.clone()),
        );
        if renamed {
            self.authorizer
                .authorize_resource(ctx, PROXY_ACTION_UPDATE_RESOURCE, &updated.urn)
                .await?;
        }

        let mut store = self.store.write().await;
        store.update_proxy_resource(updated).await
    }

    /// Deletes a proxy resource.
    pub async fn remove_proxy_resource(
        &self,
        ctx: &RequestContext,
        org: &str,
        name: &str,
    ) -> Result<()> {
        validation::validate_org(org)?;
        validation::validate_name("name", name)?;

        let resource = self.lookup_resource(org, name).await?;
        self.authorizer
            .authorize_resource(ctx, PROXY_ACTION_DELETE_RESOURCE, &resource.urn)
            .await?;

        log::debug!("removing proxy resource {}", resource.urn);
        let mut store = self.store.write().await;
        store.remove_proxy_resource(&resource.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryIamStore;

    fn admin() -> RequestContext {
        RequestContext::new("admin", true)
    }

    fn setup() -> ProxyResourceService<InMemoryIamStore> {
        ProxyResourceService::new(Arc::new(RwLock::new(InMemoryIamStore::new())))
    }

    fn add_request(name: &str) -> AddProxyResourceRequest {
        AddProxyResourceRequest {
            org: "example".to_string(),
            name: name.to_string(),
            path: "/routes/".to_string(),
            host: "https://internal.example.com".to_string(),
            url: format!("/{name}/{{id}}"),
            method: "GET".to_string(),
            urn_template: "urn:iws:iam::user/path/{id}".to_string(),
            action: "iam:getUser".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_get_proxy_resource() {
        let service = setup();
        let resource = service
            .add_proxy_resource(&admin(), add_request("users"))
            .await
            .unwrap();
        assert_eq!(resource.urn, "urn:iws:iam:example:proxy/routes/users");

        let fetched = service
            .get_proxy_resource_by_name(&admin(), "example", "users")
            .await
            .unwrap();
        assert_eq!(fetched, resource);
    }

    #[tokio::test]
    async fn test_add_proxy_resource_invalid_method() {
        let service = setup();
        let mut request = add_request("users");
        request.method = "TRACE".to_string();

        let err = service
            .add_proxy_resource(&admin(), request)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameter: method TRACE");
    }

    #[tokio::test]
    async fn test_add_proxy_resource_invalid_template() {
        let service = setup();
        let mut request = add_request("users");
        request.urn_template = "not-a-urn".to_string();

        let err = service
            .add_proxy_resource(&admin(), request)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameter: urnTemplate not-a-urn");
    }

    #[tokio::test]
    async fn test_update_proxy_resource_rename() {
        let service = setup();
        service
            .add_proxy_resource(&admin(), add_request("users"))
            .await
            .unwrap();

        let updated = service
            .update_proxy_resource(
                &admin(),
                UpdateProxyResourceRequest {
                    org: "example".to_string(),
                    name: "users".to_string(),
                    new_name: Some("users-v2".to_string()),
                    new_path: None,
                    new_host: None,
                    new_url: Some("/v2/users/{id}".to_string()),
                    new_method: None,
                    new_urn_template: None,
                    new_action: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.urn, "urn:iws:iam:example:proxy/routes/users-v2");
        assert_eq!(updated.url, "/v2/users/{id}");
        assert_eq!(updated.method, "GET");
    }

    #[tokio::test]
    async fn test_remove_proxy_resource() {
        let service = setup();
        service
            .add_proxy_resource(&admin(), add_request("users"))
            .await
            .unwrap();

        service
            .remove_proxy_resource(&admin(), "example", "users")
            .await
            .unwrap();
        let err = service
            .get_proxy_resource_by_name(&admin(), "example", "users")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Proxy resource with org example and name users not found"
        );
    }
}
