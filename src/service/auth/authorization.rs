//! Authorization Service - policy resolution and the decision gate
//!
//! Every administrative operation funnels through here:
//! 1. Admin callers bypass all checks.
//! 2. Other callers get their effective statement set resolved from group
//!    membership and attached policies, re-read on every request.
//! 3. Statements are evaluated against the operation's action and the target
//!    URN; an explicit deny is final.
//!
//! The same gate serves proxy-mode checks: the transport derives the action
//! and URN from the matched proxy resource and calls
//! [`AuthorizationService::authorize_resource`].

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::context::RequestContext;
use crate::error::{IamError, Result};
use crate::iam::policy::{evaluate_statements, Decision, Statement};
use crate::store::traits::{GroupStore, PolicyStore, UserStore};
use crate::types::Filter;

/// Page size used while walking groups and attached policies.
const RESOLVER_PAGE_SIZE: i64 = 100;

/// Ceiling on resolved policies per caller. Hitting it is logged, never
/// silent, and cannot fire below 1000 policies.
const MAX_EFFECTIVE_POLICIES: usize = 1000;

/// Decision procedure over `(caller, action, URN)`.
///
/// There is no per-kind dispatch here: new resource kinds only need a URN
/// prefix and operation wiring, the evaluation stays untouched.
pub struct AuthorizationService<S>
where
    S: UserStore + GroupStore + PolicyStore,
{
    store: Arc<RwLock<S>>,
}

impl<S> AuthorizationService<S>
where
    S: UserStore + GroupStore + PolicyStore,
{
    pub fn new(store: Arc<RwLock<S>>) -> Self {
        Self { store }
    }

    /// Gates `action` on a single URN.
    ///
    /// Admin callers pass unconditionally. Anyone else passes only when
    /// their effective statements evaluate to allow; deny and no-match both
    /// fail with `UnauthorizedResources`.
    pub async fn authorize_resource(
        &self,
        ctx: &RequestContext,
        action: &str,
        resource_urn: &str,
    ) -> Result<()> {
        if ctx.is_admin() {
            return Ok(());
        }

        let statements = self.effective_statements(ctx.identifier()).await?;
        match evaluate_statements(&statements, action, resource_urn) {
            Decision::Allow => Ok(()),
            Decision::Deny | Decision::NoMatch => Err(IamError::UnauthorizedResources {
                message: format!(
                    "User with externalId {} is not allowed to access to resource {}",
                    ctx.identifier(),
                    resource_urn
                ),
            }),
        }
    }

    /// Keeps exactly the URNs the caller may apply `action` to, preserving
    /// order. Admin callers keep the full sequence.
    pub async fn filter_authorized_resources(
        &self,
        ctx: &RequestContext,
        action: &str,
        resource_urns: &[String],
    ) -> Result<Vec<String>> {
        if ctx.is_admin() {
            return Ok(resource_urns.to_vec());
        }

        let statements = self.effective_statements(ctx.identifier()).await?;
        Ok(resource_urns
            .iter()
            .filter(|urn| evaluate_statements(&statements, action, urn) == Decision::Allow)
            .cloned()
            .collect())
    }

    /// Resolves the flattened statement set reachable from a caller through
    /// group membership and policy attachment.
    ///
    /// A caller whose external id has no user record is a trust-boundary
    /// failure and surfaces as `UnauthorizedResources`, not as a missing
    /// record.
    pub async fn effective_statements(&self, external_id: &str) -> Result<Vec<Statement>> {
        let store = self.store.read().await;

        let user = store
            .get_user_by_external_id(external_id)
            .await?
            .ok_or_else(|| IamError::UnauthorizedResources {
                message: format!(
                    "Authenticated user with externalId {} not found. Unable to retrieve permissions.",
                    external_id
                ),
            })?;

        let mut statements = Vec::new();
        let mut policy_count = 0usize;
        let mut group_offset = 0i64;

        'groups: loop {
            let group_page = Filter {
                offset: group_offset,
                limit: RESOLVER_PAGE_SIZE,
                ..Default::default()
            };
            let (groups, group_total) = store.get_groups_by_user_id(&user.id, &group_page).await?;
            if groups.is_empty() {
                break;
            }
            group_offset += groups.len() as i64;

            for group in &groups {
                let mut policy_offset = 0i64;
                loop {
                    let policy_page = Filter {
                        offset: policy_offset,
                        limit: RESOLVER_PAGE_SIZE,
                        ..Default::default()
                    };
                    let (policies, _) =
                        store.get_attached_policies(&group.id, &policy_page).await?;
                    if policies.is_empty() {
                        break;
                    }
                    policy_offset += policies.len() as i64;

                    for policy in policies {
                        if policy_count >= MAX_EFFECTIVE_POLICIES {
                            log::warn!(
                                "effective policy cap of {} reached for externalId {}, remaining policies ignored",
                                MAX_EFFECTIVE_POLICIES,
                                external_id
                            );
                            break 'groups;
                        }
                        policy_count += 1;
                        statements.extend(policy.statements);
                    }
                }
            }

            if group_offset >= group_total {
                break;
            }
        }

        Ok(statements)
    }
}
