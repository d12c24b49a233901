//! Group Service
//!
//! Administrative operations over groups, the membership relation and the
//! policy attachment relation.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::context::RequestContext;
use crate::error::{IamError, Result};
use crate::iam::actions::{
    GROUP_ACTION_ADD_MEMBER, GROUP_ACTION_ATTACH_POLICY, GROUP_ACTION_CREATE_GROUP,
    GROUP_ACTION_DELETE_GROUP, GROUP_ACTION_DETACH_POLICY, GROUP_ACTION_GET_GROUP,
    GROUP_ACTION_LIST_ATTACHED_POLICIES, GROUP_ACTION_LIST_GROUPS, GROUP_ACTION_LIST_MEMBERS,
    GROUP_ACTION_REMOVE_MEMBER, GROUP_ACTION_UPDATE_GROUP,
};
use crate::iam::group::{builder as group_builder, AddGroupRequest, Group, UpdateGroupRequest};
use crate::iam::{Policy, User};
use crate::service::auth::AuthorizationService;
use crate::store::traits::{GroupStore, PolicyStore, UserStore};
use crate::types::Filter;
use crate::urn::{ResourceKind, Urn};
use crate::validation;

/// Service for managing groups and their relations.
pub struct GroupService<S>
where
    S: UserStore + GroupStore + PolicyStore,
{
    store: Arc<RwLock<S>>,
    authorizer: AuthorizationService<S>,
}

impl<S> GroupService<S>
where
    S: UserStore + GroupStore + PolicyStore,
{
    pub fn new(store: Arc<RwLock<S>>) -> Self {
        Self {
            authorizer: AuthorizationService::new(store.clone()),
            store,
        }
    }

    async fn lookup_group(&self, org: &str, name: &str) -> Result<Group> {
        let store = self.store.read().await;
        store
            .get_group_by_name(org, name)
            .await?
            .ok_or_else(|| IamError::GroupNotFound {
                message: format!("Group with org {} and name {} not found", org, name),
            })
    }

    async fn lookup_user(&self, external_id: &str) -> Result<User> {
        let store = self.store.read().await;
        store
            .get_user_by_external_id(external_id)
            .await?
            .ok_or_else(|| IamError::UserNotFound {
                message: format!("User with externalId {} not found", external_id),
            })
    }

    /// Creates a group.
    pub async fn add_group(&self, ctx: &RequestContext, request: AddGroupRequest) -> Result<Group> {
        validation::validate_org(&request.org)?;
        validation::validate_name("name", &request.name)?;
        validation::validate_path("path", &request.path)?;

        let urn = Urn::new(
            request.org.clone(),
            ResourceKind::Group,
            request.path.clone(),
            request.name.clone(),
        )
        .to_string();

        let existing = {
            let store = self.store.read().await;
            store.get_group_by_name(&request.org, &request.name).await?
        };
        if existing.is_some() {
            return Err(IamError::GroupAlreadyExist {
                message: format!(
                    "Unable to create group, group with org {} and name {} already exist",
                    request.org, request.name
                ),
            });
        }

        self.authorizer
            .authorize_resource(ctx, GROUP_ACTION_CREATE_GROUP, &urn)
            .await?;

        let group = group_builder::build_group(request.org, request.name, request.path);
        log::debug!("creating group {}", group.urn);
        let mut store = self.store.write().await;
        store.add_group(group).await
    }

    /// Fetches a group by org and name.
    pub async fn get_group_by_name(
        &self,
        ctx: &RequestContext,
        org: &str,
        name: &str,
    ) -> Result<Group> {
        validation::validate_org(org)?;
        validation::validate_name("name", name)?;

        let group = self.lookup_group(org, name).await?;
        self.authorizer
            .authorize_resource(ctx, GROUP_ACTION_GET_GROUP, &group.urn)
            .await?;
        Ok(group)
    }

    /// Lists groups, pruned to those the caller may list.
    pub async fn list_groups(
        &self,
        ctx: &RequestContext,
        filter: &Filter,
    ) -> Result<(Vec<Group>, i64)> {
        validation::validate_filter(filter)?;

        let (groups, total) = {
            let store = self.store.read().await;
            store.get_groups_filtered(filter).await?
        };

        if ctx.is_admin() {
            return Ok((groups, total));
        }

        let urns: Vec<String> = groups.iter().map(|g| g.urn.clone()).collect();
        let allowed = self
            .authorizer
            .filter_authorized_resources(ctx, GROUP_ACTION_LIST_GROUPS, &urns)
            .await?;
        let groups: Vec<Group> = groups
            .into_iter()
            .filter(|g| allowed.contains(&g.urn))
            .collect();
        let total = groups.len() as i64;
        Ok((groups, total))
    }

    /// Renames or moves a group. Both the current and the target URN must
    /// pass the gate, and the target `(org, name)` must be free.
    pub async fn update_group(
        &self,
        ctx: &RequestContext,
        request: UpdateGroupRequest,
    ) -> Result<Group> {
        validation::validate_org(&request.org)?;
        validation::validate_name("name", &request.name)?;
        if let Some(new_name) = &request.new_name {
            validation::validate_name("new name", new_name)?;
        }
        if let Some(new_path) = &request.new_path {
            validation::validate_path("new path", new_path)?;
        }

        let group = self.lookup_group(&request.org, &request.name).await?;

        self.authorizer
            .authorize_resource(ctx, GROUP_ACTION_UPDATE_GROUP, &group.urn)
            .await?;

        let new_name = request.new_name.unwrap_or_else(|| group.name.clone());
        let new_path = request.new_path.unwrap_or_else(|| group.path.clone());
        let renamed = new_name != group.name || new_path != group.path;

        if renamed {
            let occupant = {
                let store = self.store.read().await;
                store.get_group_by_name(&request.org, &new_name).await?
            };
            if occupant.is_some_and(|g| g.id != group.id) {
                return Err(IamError::GroupAlreadyExist {
                    message: format!("Group name: {} already exists", new_name),
                });
            }
        }

        let updated = group_builder::update_group(group, new_name, new_path);
        if renamed {
            self.authorizer
                .authorize_resource(ctx, GROUP_ACTION_UPDATE_GROUP, &updated.urn)
                .await?;
        }

        let mut store = self.store.write().await;
        store.update_group(updated).await
    }

    /// Deletes a group; memberships and attachments cascade away.
    pub async fn remove_group(&self, ctx: &RequestContext, org: &str, name: &str) -> Result<()> {
        validation::validate_org(org)?;
        validation::validate_name("name", name)?;

        let group = self.lookup_group(org, name).await?;
        self.authorizer
            .authorize_resource(ctx, GROUP_ACTION_DELETE_GROUP, &group.urn)
            .await?;

        log::debug!("removing group {}", group.urn);
        let mut store = self.store.write().await;
        store.remove_group(&group.id).await
    }

    /// Adds a user to a group. Both must exist.
    pub async fn add_member(
        &self,
        ctx: &RequestContext,
        external_id: &str,
        org: &str,
        group_name: &str,
    ) -> Result<()> {
        validation::validate_external_id("externalId", external_id)?;
        validation::validate_org(org)?;
        validation::validate_name("name", group_name)?;

        let user = self.lookup_user(external_id).await?;
        let group = self.lookup_group(org, group_name).await?;

        self.authorizer
            .authorize_resource(ctx, GROUP_ACTION_ADD_MEMBER, &group.urn)
            .await?;

        let already_member = {
            let store = self.store.read().await;
            store.is_member_of_group(&user.id, &group.id).await?
        };
        if already_member {
            return Err(IamError::UserIsAlreadyAMember {
                message: format!(
                    "User with externalId {} is already a member of group with org {} and name {}",
                    external_id, org, group_name
                ),
            });
        }

        let mut store = self.store.write().await;
        store.add_member(&user.id, &group.id).await
    }

    /// Removes a user from a group.
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        external_id: &str,
        org: &str,
        group_name: &str,
    ) -> Result<()> {
        validation::validate_external_id("externalId", external_id)?;
        validation::validate_org(org)?;
        validation::validate_name("name", group_name)?;

        let user = self.lookup_user(external_id).await?;
        let group = self.lookup_group(org, group_name).await?;

        self.authorizer
            .authorize_resource(ctx, GROUP_ACTION_REMOVE_MEMBER, &group.urn)
            .await?;

        let is_member = {
            let store = self.store.read().await;
            store.is_member_of_group(&user.id, &group.id).await?
        };
        if !is_member {
            return Err(IamError::UserIsNotAMember {
                message: format!(
                    "User with externalId {} is not a member of group with org {} and name {}",
                    external_id, org, group_name
                ),
            });
        }

        let mut store = self.store.write().await;
        store.remove_member(&user.id, &group.id).await
    }

    /// Lists the members of a group. Gated on the group URN.
    pub async fn list_members(
        &self,
        ctx: &RequestContext,
        org: &str,
        group_name: &str,
        filter: &Filter,
    ) -> Result<(Vec<User>, i64)> {
        validation::validate_org(org)?;
        validation::validate_name("name", group_name)?;
        validation::validate_filter(filter)?;

        let group = self.lookup_group(org, group_name).await?;
        self.authorizer
            .authorize_resource(ctx, GROUP_ACTION_LIST_MEMBERS, &group.urn)
            .await?;

        let store = self.store.read().await;
        store.get_group_members(&group.id, filter).await
    }

    /// Attaches a policy to a group. Cross-org attachment is accepted; the
    /// lookup scopes the policy to the group's org.
    pub async fn attach_policy(
        &self,
        ctx: &RequestContext,
        org: &str,
        group_name: &str,
        policy_name: &str,
    ) -> Result<()> {
        validation::validate_org(org)?;
        validation::validate_name("name", group_name)?;
        validation::validate_name("name", policy_name)?;

        let group = self.lookup_group(org, group_name).await?;
        let policy = {
            let store = self.store.read().await;
            store.get_policy_by_name(org, policy_name).await?
        }
        .ok_or_else(|| IamError::PolicyNotFound {
            message: format!("Policy with org {} and name {} not found", org, policy_name),
        })?;

        self.authorizer
            .authorize_resource(ctx, GROUP_ACTION_ATTACH_POLICY, &group.urn)
            .await?;

        let already_attached = {
            let store = self.store.read().await;
            store.is_attached_to_group(&group.id, &policy.id).await?
        };
        if already_attached {
            return Err(IamError::PolicyIsAlreadyAttached {
                message: format!(
                    "Policy with org {} and name {} is already attached to group with org {} and name {}",
                    org, policy_name, org, group_name
                ),
            });
        }

        let mut store = self.store.write().await;
        store.attach_policy(&group.id, &policy.id).await
    }

    /// Detaches a policy from a group.
    pub async fn detach_policy(
        &self,
        ctx: &RequestContext,
        org: &str,
        group_name: &str,
        policy_name: &str,
    ) -> Result<()> {
        validation::validate_org(org)?;
        validation::validate_name("name", group_name)?;
        validation::validate_name("name", policy_name)?;

        let group = self.lookup_group(org, group_name).await?;
        let policy = {
            let store = self.store.read().await;
            store.get_policy_by_name(org, policy_name).await?
        }
        .ok_or_else(|| IamError::PolicyNotFound {
            message: format!("Policy with org {} and name {} not found", org, policy_name),
        })?;

        self.authorizer
            .authorize_resource(ctx, GROUP_ACTION_DETACH_POLICY, &group.urn)
            .await?;

        let attached = {
            let store = self.store.read().await;
            store.is_attached_to_group(&group.id, &policy.id).await?
        };
        if !attached {
            return Err(IamError::PolicyIsNotAttached {
                message: format!(
                    "Policy with org {} and name {} is not attached to group with org {} and name {}",
                    org, policy_name, org, group_name
                ),
            });
        }

        let mut store = self.store.write().await;
        store.detach_policy(&group.id, &policy.id).await
    }

    /// Lists the policies attached to a group. Gated on the group URN.
    pub async fn list_attached_policies(
        &self,
        ctx: &RequestContext,
        org: &str,
        group_name: &str,
        filter: &Filter,
    ) -> Result<(Vec<Policy>, i64)> {
        validation::validate_org(org)?;
        validation::validate_name("name", group_name)?;
        validation::validate_filter(filter)?;

        let group = self.lookup_group(org, group_name).await?;
        self.authorizer
            .authorize_resource(ctx, GROUP_ACTION_LIST_ATTACHED_POLICIES, &group.urn)
            .await?;

        let store = self.store.read().await;
        store.get_attached_policies(&group.id, filter).await
    }
}
