//! IAM domain layer: entities, builders and the statement evaluator.
//!
//! Modules here hold pure domain logic only; persistence lives behind the
//! store traits and orchestration in the service layer.

pub mod actions;
pub mod group;
pub mod policy;
pub mod proxy;
pub mod user;

pub use group::Group;
pub use policy::{Policy, Statement};
pub use proxy::ProxyResource;
pub use user::User;
