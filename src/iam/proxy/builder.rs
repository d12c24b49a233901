//! Pure construction and update helpers for proxy resources.

use chrono::Utc;
use uuid::Uuid;

use super::model::ProxyResource;
use super::requests::AddProxyResourceRequest;
use crate::urn::{ResourceKind, Urn};

/// Builds a new proxy resource from a create request.
pub fn build_proxy_resource(request: AddProxyResourceRequest) -> ProxyResource {
    let urn = Urn::new(
        request.org.clone(),
        ResourceKind::Proxy,
        request.path.clone(),
        request.name.clone(),
    )
    .to_string();
    let now = Utc::now();
    ProxyResource {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        org: request.org,
        path: request.path,
        urn,
        host: request.host,
        url: request.url,
        method: request.method,
        urn_template: request.urn_template,
        action: request.action,
        create_at: now,
        update_at: now,
    }
}

/// Applies an update, rewriting the record URN from the new name and path.
#[allow(clippy::too_many_arguments)]
pub fn update_proxy_resource(
    resource: ProxyResource,
    new_name: String,
    new_path: String,
    new_host: String,
    new_url: String,
    new_method: String,
    new_urn_template: String,
    new_action: String,
) -> ProxyResource {
    let urn = Urn::new(
        resource.org.clone(),
        ResourceKind::Proxy,
        new_path.clone(),
        new_name.clone(),
    )
    .to_string();
    ProxyResource {
        name: new_name,
        path: new_path,
        urn,
        host: new_host,
        url: new_url,
        method: new_method,
        urn_template: new_urn_template,
        action: new_action,
        update_at: Utc::now(),
        ..resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AddProxyResourceRequest {
        AddProxyResourceRequest {
            org: "example".to_string(),
            name: "user-by-id".to_string(),
            path: "/routes/".to_string(),
            host: "https://internal.example.com".to_string(),
            url: "/users/{id}".to_string(),
            method: "GET".to_string(),
            urn_template: "urn:iws:iam::user/path/{id}".to_string(),
            action: "iam:getUser".to_string(),
        }
    }

    #[test]
    fn test_build_proxy_resource_derives_urn() {
        let resource = build_proxy_resource(request());
        assert_eq!(resource.urn, "urn:iws:iam:example:proxy/routes/user-by-id");
        assert_eq!(resource.method, "GET");
    }

    #[test]
    fn test_update_proxy_resource_rewrites_urn() {
        let resource = build_proxy_resource(request());
        let updated = update_proxy_resource(
            resource,
            "user-by-id-v2".to_string(),
            "/routes/v2/".to_string(),
            "https://internal.example.com".to_string(),
            "/v2/users/{id}".to_string(),
            "GET".to_string(),
            "urn:iws:iam::user/path/{id}".to_string(),
            "iam:getUser".to_string(),
        );
        assert_eq!(
            updated.urn,
            "urn:iws:iam:example:proxy/routes/v2/user-by-id-v2"
        );
    }
}
