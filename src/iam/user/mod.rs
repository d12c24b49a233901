//! User domain: external principals known to the system.

pub mod builder;
pub mod model;
pub mod requests;

pub use model::User;
pub use requests::{AddUserRequest, UpdateUserRequest};
