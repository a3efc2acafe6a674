//! Identity resolution
//!
//! Turns a verified token into an [`AuthenticatedUser`] by looking the
//! subject up in the user directory. Unknown subjects and deactivated
//! accounts are rejected even when the token itself is valid.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{DomainPort, PortError, UserId};

use crate::error::AuthError;
use crate::jwt::verify_token;

/// A user account as stored in the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier
    pub id: UserId,
    /// Login email, unique across users
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Whether the account may authenticate
    pub is_active: bool,
}

/// The identity attached to a request after verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Unique identifier
    pub id: UserId,
    /// Login email; recorded as `processed_by` on created payments
    pub email: String,
    /// Display name
    pub full_name: String,
}

/// Lookup port for user accounts
#[async_trait]
pub trait UserDirectory: DomainPort {
    /// Finds a user by login email
    async fn find_user(&self, email: &str) -> Result<Option<UserRecord>, PortError>;
}

/// Verifies bearer tokens against a secret and a user directory
pub struct JwtIdentityProvider {
    directory: Arc<dyn UserDirectory>,
    secret: String,
}

impl JwtIdentityProvider {
    /// Creates a provider over the given directory and signing secret
    pub fn new(directory: Arc<dyn UserDirectory>, secret: impl Into<String>) -> Self {
        Self {
            directory,
            secret: secret.into(),
        }
    }

    /// Resolves a bearer token to an active user
    ///
    /// # Errors
    ///
    /// `InvalidToken`/`TokenExpired` when verification fails, `UnknownUser`
    /// when the subject matches no account, `InactiveAccount` when the
    /// account has been deactivated.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = verify_token(token, &self.secret)?;

        let user = self
            .directory
            .find_user(&claims.sub)
            .await?
            .ok_or_else(|| AuthError::UnknownUser(claims.sub.clone()))?;

        if !user.is_active {
            return Err(AuthError::InactiveAccount(user.email));
        }

        debug!(user_id = %user.id, "token resolved to active user");
        Ok(AuthenticatedUser {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
        })
    }
}

impl std::fmt::Debug for JwtIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityProvider").finish_non_exhaustive()
    }
}
