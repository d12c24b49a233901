//! Proxy resource service: lifecycle of the routing records the proxy
//! transport consults.

pub mod resource;

pub use resource::ProxyResourceService;
