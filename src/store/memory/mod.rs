//! In-memory store implementation.
//!
//! Backs the test-suite and lightweight embeddings. All maps are keyed by
//! stable id except users, which are keyed by their unique external id.
//! Compound mutations (entity plus relations) happen under the caller's
//! store lock, so they are atomic with respect to other requests.

mod group;
mod policy;
mod proxy;
mod user;

use std::collections::HashMap;

use crate::iam::{Group, Policy, ProxyResource, User};
use crate::types::Filter;

/// In-memory implementation of every store trait.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIamStore {
    pub(crate) users: HashMap<String, User>,
    pub(crate) groups: HashMap<String, Group>,
    pub(crate) policies: HashMap<String, Policy>,
    pub(crate) proxy_resources: HashMap<String, ProxyResource>,
    // group_id -> user ids
    pub(crate) group_members: HashMap<String, Vec<String>>,
    // group_id -> policy ids
    pub(crate) group_policies: HashMap<String, Vec<String>>,
}

impl InMemoryIamStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Applies offset/limit to an already-filtered, already-sorted list and
/// returns the page plus the total before paging.
pub(crate) fn paginate<T>(items: Vec<T>, filter: &Filter) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let page = items
        .into_iter()
        .skip(filter.offset as usize)
        .take(filter.effective_limit() as usize)
        .collect();
    (page, total)
}
