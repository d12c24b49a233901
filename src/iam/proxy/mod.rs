//! Proxy resource domain: routing records the proxy transport consults.

pub mod builder;
pub mod model;
pub mod requests;

pub use model::ProxyResource;
pub use requests::{AddProxyResourceRequest, UpdateProxyResourceRequest};
