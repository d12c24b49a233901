//! Proxy Resource Store Trait

use crate::error::Result;
use crate::iam::ProxyResource;
use crate::types::Filter;
use async_trait::async_trait;

/// Store trait for proxy routing records.
#[async_trait]
pub trait ProxyResourceStore: Send + Sync {
    /// Persist a new record. Fails when `(org, name)` or
    /// `(host, method, url)` is taken.
    async fn add_proxy_resource(&mut self, resource: ProxyResource) -> Result<ProxyResource>;

    /// Look up a record by org and name.
    async fn get_proxy_resource_by_name(
        &self,
        org: &str,
        name: &str,
    ) -> Result<Option<ProxyResource>>;

    /// Replace a stored record.
    async fn update_proxy_resource(&mut self, resource: ProxyResource) -> Result<ProxyResource>;

    /// Delete a record.
    async fn remove_proxy_resource(&mut self, id: &str) -> Result<()>;

    /// List records matching the filter; returns the page plus the total
    /// before paging.
    async fn get_proxy_resources_filtered(
        &self,
        filter: &Filter,
    ) -> Result<(Vec<ProxyResource>, i64)>;
}
