//! Proxy resource store implementation for `InMemoryIamStore`.

use super::{paginate, InMemoryIamStore};
use crate::error::{IamError, Result};
use crate::iam::ProxyResource;
use crate::store::traits::ProxyResourceStore;
use crate::types::Filter;
use async_trait::async_trait;

#[async_trait]
impl ProxyResourceStore for InMemoryIamStore {
    async fn add_proxy_resource(&mut self, resource: ProxyResource) -> Result<ProxyResource> {
        let name_taken = self
            .proxy_resources
            .values()
            .any(|r| r.org == resource.org && r.name == resource.name);
        if name_taken {
            return Err(IamError::ProxyResourceAlreadyExist {
                message: format!(
                    "Unable to create proxy resource, proxy resource with org {} and name {} already exist",
                    resource.org, resource.name
                ),
            });
        }
        let route_taken = self.proxy_resources.values().any(|r| {
            r.host == resource.host && r.method == resource.method && r.url == resource.url
        });
        if route_taken {
            return Err(IamError::ProxyResourceAlreadyExist {
                message: format!(
                    "Unable to create proxy resource, proxy resource with host {}, method {} and url {} already exist",
                    resource.host, resource.method, resource.url
                ),
            });
        }
        self.proxy_resources
            .insert(resource.id.clone(), resource.clone());
        Ok(resource)
    }

    async fn get_proxy_resource_by_name(
        &self,
        org: &str,
        name: &str,
    ) -> Result<Option<ProxyResource>> {
        Ok(self
            .proxy_resources
            .values()
            .find(|r| r.org == org && r.name == name)
            .cloned())
    }

    async fn update_proxy_resource(&mut self, resource: ProxyResource) -> Result<ProxyResource> {
        self.proxy_resources
            .insert(resource.id.clone(), resource.clone());
        Ok(resource)
    }

    async fn remove_proxy_resource(&mut self, id: &str) -> Result<()> {
        self.proxy_resources.remove(id);
        Ok(())
    }

    async fn get_proxy_resources_filtered(
        &self,
        filter: &Filter,
    ) -> Result<(Vec<ProxyResource>, i64)> {
        let mut resources: Vec<ProxyResource> = self.proxy_resources.values().cloned().collect();

        if let Some(org) = &filter.org {
            resources.retain(|resource| &resource.org == org);
        }
        if let Some(prefix) = &filter.path_prefix {
            resources.retain(|resource| resource.path.starts_with(prefix.as_str()));
        }

        resources.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(resources, filter))
    }
}
