//! Identity provider tests over an in-memory user directory

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, UserId};
use interface_auth::{
    create_token, AuthError, JwtIdentityProvider, UserDirectory, UserRecord,
    DEFAULT_TOKEN_TTL_SECS,
};

const SECRET: &str = "test-secret";

struct MemoryDirectory {
    users: HashMap<String, UserRecord>,
}

impl MemoryDirectory {
    fn with_users(users: Vec<UserRecord>) -> Arc<Self> {
        Arc::new(Self {
            users: users.into_iter().map(|u| (u.email.clone(), u)).collect(),
        })
    }
}

impl DomainPort for MemoryDirectory {}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_user(&self, email: &str) -> Result<Option<UserRecord>, PortError> {
        Ok(self.users.get(email).cloned())
    }
}

fn user(email: &str, is_active: bool) -> UserRecord {
    UserRecord {
        id: UserId::new(),
        email: email.to_string(),
        full_name: "Test User".to_string(),
        is_active,
    }
}

#[tokio::test]
async fn test_valid_token_resolves_to_user() {
    let account = user("admin@example.com", true);
    let provider = JwtIdentityProvider::new(
        MemoryDirectory::with_users(vec![account.clone()]),
        SECRET,
    );

    let token = create_token(&account.email, SECRET, DEFAULT_TOKEN_TTL_SECS).unwrap();
    let authenticated = provider.authenticate(&token).await.unwrap();

    assert_eq!(authenticated.id, account.id);
    assert_eq!(authenticated.email, "admin@example.com");
}

#[tokio::test]
async fn test_unknown_subject_is_rejected() {
    let provider = JwtIdentityProvider::new(MemoryDirectory::with_users(vec![]), SECRET);

    let token = create_token("ghost@example.com", SECRET, DEFAULT_TOKEN_TTL_SECS).unwrap();
    assert!(matches!(
        provider.authenticate(&token).await,
        Err(AuthError::UnknownUser(_))
    ));
}

#[tokio::test]
async fn test_inactive_account_is_rejected() {
    let account = user("retired@example.com", false);
    let provider =
        JwtIdentityProvider::new(MemoryDirectory::with_users(vec![account]), SECRET);

    let token = create_token("retired@example.com", SECRET, DEFAULT_TOKEN_TTL_SECS).unwrap();
    assert!(matches!(
        provider.authenticate(&token).await,
        Err(AuthError::InactiveAccount(_))
    ));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let account = user("admin@example.com", true);
    let provider =
        JwtIdentityProvider::new(MemoryDirectory::with_users(vec![account]), SECRET);

    let token =
        create_token("admin@example.com", "other-secret", DEFAULT_TOKEN_TTL_SECS).unwrap();
    assert!(matches!(
        provider.authenticate(&token).await,
        Err(AuthError::InvalidToken)
    ));
}
