//! Service Layer
//!
//! Orchestrates the domain builders with store persistence. Every operation
//! follows the same shape:
//!
//! ```text
//! validate inputs
//!     -> compute target URN(s)
//!     -> pre-existence / lookup
//!     -> authorization gate (admin bypass, else policy evaluation)
//!     -> store mutation or read
//!     -> (lists) prune results to the URNs the caller may act on
//! ```
//!
//! Services keep no state of their own beyond the shared store handle;
//! effective policies are resolved from the store on every request.

pub mod auth;
pub mod identity;
pub mod policies;
pub mod proxy;

pub use auth::AuthorizationService;
pub use identity::{GroupService, UserService};
pub use policies::PolicyService;
pub use proxy::ProxyResourceService;
