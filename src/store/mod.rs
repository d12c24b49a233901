//! Store Module
//!
//! Storage abstraction consumed by the service layer. One focused trait per
//! entity plus the relation methods that belong with it; `memory` provides
//! the in-process implementation used by tests and lightweight embeddings.
//! Relational backends live outside this crate and implement the same
//! traits.

pub mod memory;
pub mod traits;

pub use memory::InMemoryIamStore;
pub use traits::{GroupStore, PolicyStore, ProxyResourceStore, UserStore};
