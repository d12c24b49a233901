//! User Service
//!
//! Administrative operations over external users. Every call is gated on the
//! caller's effective policies against the target user URN.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::context::RequestContext;
use crate::error::{IamError, Result};
use crate::iam::actions::{
    USER_ACTION_CREATE_USER, USER_ACTION_DELETE_USER, USER_ACTION_GET_USER,
    USER_ACTION_LIST_GROUPS_FOR_USER, USER_ACTION_LIST_USERS, USER_ACTION_UPDATE_USER,
};
use crate::iam::user::{builder as user_builder, AddUserRequest, UpdateUserRequest, User};
use crate::iam::Group;
use crate::service::auth::AuthorizationService;
use crate::store::traits::{GroupStore, PolicyStore, UserStore};
use crate::types::Filter;
use crate::urn::{ResourceKind, Urn};
use crate::validation;

/// Service for managing external users.
pub struct UserService<S>
where
    S: UserStore + GroupStore + PolicyStore,
{
    store: Arc<RwLock<S>>,
    authorizer: AuthorizationService<S>,
}

impl<S> UserService<S>
where
    S: UserStore + GroupStore + PolicyStore,
{
    pub fn new(store: Arc<RwLock<S>>) -> Self {
        Self {
            authorizer: AuthorizationService::new(store.clone()),
            store,
        }
    }

    /// Registers a new external user.
    pub async fn add_user(&self, ctx: &RequestContext, request: AddUserRequest) -> Result<User> {
        validation::validate_external_id("externalId", &request.external_id)?;
        validation::validate_path("path", &request.path)?;

        let urn = Urn::new(
            "",
            ResourceKind::User,
            request.path.clone(),
            request.external_id.clone(),
        )
        .to_string();

        let existing = {
            let store = self.store.read().await;
            store.get_user_by_external_id(&request.external_id).await?
        };
        if existing.is_some() {
            return Err(IamError::UserAlreadyExist {
                message: format!(
                    "Unable to create user, user with externalId {} already exist",
                    request.external_id
                ),
            });
        }

        self.authorizer
            .authorize_resource(ctx, USER_ACTION_CREATE_USER, &urn)
            .await?;

        let user = user_builder::build_user(request.external_id, request.path);
        log::debug!("creating user {}", user.urn);
        let mut store = self.store.write().await;
        store.add_user(user).await
    }

    /// Fetches a user by external id.
    pub async fn get_user_by_external_id(
        &self,
        ctx: &RequestContext,
        external_id: &str,
    ) -> Result<User> {
        validation::validate_external_id("externalId", external_id)?;

        let user = {
            let store = self.store.read().await;
            store.get_user_by_external_id(external_id).await?
        }
        .ok_or_else(|| IamError::UserNotFound {
            message: format!("User with externalId {} not found", external_id),
        })?;

        self.authorizer
            .authorize_resource(ctx, USER_ACTION_GET_USER, &user.urn)
            .await?;

        Ok(user)
    }

    /// Lists users, pruned to those the caller may list. The returned total
    /// is the repository total for admin callers and the pruned count
    /// otherwise.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        filter: &Filter,
    ) -> Result<(Vec<User>, i64)> {
        validation::validate_filter(filter)?;

        let (users, total) = {
            let store = self.store.read().await;
            store.get_users_filtered(filter).await?
        };

        if ctx.is_admin() {
            return Ok((users, total));
        }

        let urns: Vec<String> = users.iter().map(|u| u.urn.clone()).collect();
        let allowed = self
            .authorizer
            .filter_authorized_resources(ctx, USER_ACTION_LIST_USERS, &urns)
            .await?;
        let users: Vec<User> = users
            .into_iter()
            .filter(|u| allowed.contains(&u.urn))
            .collect();
        let total = users.len() as i64;
        Ok((users, total))
    }

    /// Moves a user to a new path. Both the current and the target URN must
    /// pass the gate.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        request: UpdateUserRequest,
    ) -> Result<User> {
        validation::validate_external_id("externalId", &request.external_id)?;
        validation::validate_path("new path", &request.new_path)?;

        let user = {
            let store = self.store.read().await;
            store.get_user_by_external_id(&request.external_id).await?
        }
        .ok_or_else(|| IamError::UserNotFound {
            message: format!("User with externalId {} not found", request.external_id),
        })?;

        self.authorizer
            .authorize_resource(ctx, USER_ACTION_UPDATE_USER, &user.urn)
            .await?;

        let moved = request.new_path != user.path;
        let updated = user_builder::update_user(user, request.new_path);
        if moved {
            // The caller must also hold update on the URN about to exist
            self.authorizer
                .authorize_resource(ctx, USER_ACTION_UPDATE_USER, &updated.urn)
                .await?;
        }

        let mut store = self.store.write().await;
        store.update_user(updated).await
    }

    /// Deletes a user; the repository cascades its memberships away.
    pub async fn remove_user(&self, ctx: &RequestContext, external_id: &str) -> Result<()> {
        validation::validate_external_id("externalId", external_id)?;

        let user = {
            let store = self.store.read().await;
            store.get_user_by_external_id(external_id).await?
        }
        .ok_or_else(|| IamError::UserNotFound {
            message: format!("User with externalId {} not found", external_id),
        })?;

        self.authorizer
            .authorize_resource(ctx, USER_ACTION_DELETE_USER, &user.urn)
            .await?;

        log::debug!("removing user {}", user.urn);
        let mut store = self.store.write().await;
        store.remove_user(external_id).await
    }

    /// Lists the groups a user belongs to. Gated on the user URN.
    pub async fn list_user_groups(
        &self,
        ctx: &RequestContext,
        external_id: &str,
        filter: &Filter,
    ) -> Result<(Vec<Group>, i64)> {
        validation::validate_external_id("externalId", external_id)?;
        validation::validate_filter(filter)?;

        let user = {
            let store = self.store.read().await;
            store.get_user_by_external_id(external_id).await?
        }
        .ok_or_else(|| IamError::UserNotFound {
            message: format!("User with externalId {} not found", external_id),
        })?;

        self.authorizer
            .authorize_resource(ctx, USER_ACTION_LIST_GROUPS_FOR_USER, &user.urn)
            .await?;

        let store = self.store.read().await;
        store.get_groups_by_user_id(&user.id, filter).await
    }
}
