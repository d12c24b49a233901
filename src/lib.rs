//! warden - URN-scoped identity and access management core
//!
//! This library governs who may perform which actions on which resources
//! within named organizations. External users, organized into groups, derive
//! their permissions from policies attached to those groups; every
//! administrative operation on the IAM objects themselves goes through the
//! same policy evaluation, so the system secures its own management plane.
//!
//! ## Features
//!
//! - **URN naming**: every object is addressed as
//!   `urn:iws:iam:{org}:{kind}{path}{name}`, with glob matching for policy
//!   resource patterns
//! - **Statement evaluation**: pure allow/deny/no-match decision where an
//!   explicit deny is final
//! - **Self-referential authorization**: users, groups, policies and proxy
//!   resources are all gated through the caller's own effective policies
//! - **Repository seam**: persistence sits behind per-entity async store
//!   traits; an in-memory store ships for tests and lightweight embedding
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tokio::sync::RwLock;
//! use warden::iam::policy::{AddPolicyRequest, Statement};
//! use warden::store::InMemoryIamStore;
//! use warden::{PolicyService, RequestContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(RwLock::new(InMemoryIamStore::new()));
//!     let policies = PolicyService::new(store);
//!
//!     // Admin callers bypass the gate; everyone else needs a policy chain
//!     let admin = RequestContext::new("123456", true);
//!
//!     let policy = policies
//!         .add_policy(
//!             &admin,
//!             AddPolicyRequest {
//!                 org: "example".to_string(),
//!                 name: "read-users".to_string(),
//!                 path: "/path/".to_string(),
//!                 statements: vec![Statement::new(
//!                     "allow",
//!                     vec!["iam:getUser".to_string()],
//!                     vec!["urn:iws:iam::user/path/*".to_string()],
//!                 )],
//!             },
//!         )
//!         .await?;
//!     assert_eq!(policy.urn, "urn:iws:iam:example:policy/path/read-users");
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod error;
pub mod iam;
pub mod service;
pub mod store;
pub mod types;
pub mod urn;
pub mod validation;

// Re-export main types for convenience
pub use context::RequestContext;
pub use error::{IamError, Result};
pub use types::Filter;
pub use urn::{matches_pattern, ResourceKind, Urn};

// Re-export entities
pub use iam::{Group, Policy, ProxyResource, Statement, User};

// Re-export services
pub use service::{
    AuthorizationService, GroupService, PolicyService, ProxyResourceService, UserService,
};
