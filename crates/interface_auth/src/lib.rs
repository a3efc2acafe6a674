//! Identity Interface
//!
//! Verifies bearer tokens and resolves them to active user accounts. The
//! contract is deliberately small: HS256 tokens whose subject is the user's
//! email, checked against a user directory that rejects unknown and
//! deactivated accounts.

pub mod directory;
pub mod error;
pub mod identity;
pub mod jwt;

pub use directory::PostgresUserDirectory;
pub use error::AuthError;
pub use identity::{AuthenticatedUser, JwtIdentityProvider, UserDirectory, UserRecord};
pub use jwt::{create_token, verify_token, Claims, DEFAULT_TOKEN_TTL_SECS};
