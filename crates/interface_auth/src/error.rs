//! Auth error types

use core_kernel::PortError;
use thiserror::Error;

/// Errors raised while verifying an identity
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token is malformed or its signature does not verify
    #[error("Invalid token")]
    InvalidToken,

    /// The token verified but its expiry has passed
    #[error("Token expired")]
    TokenExpired,

    /// The token's subject does not match any user account
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// The user account exists but has been deactivated
    #[error("Account is inactive: {0}")]
    InactiveAccount(String),

    /// The user directory failed
    #[error("Directory error")]
    Directory(#[from] PortError),
}
