//! JWT encoding and verification

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Default token validity: eight days
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 8 * 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email
    pub sub: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Creates a signed HS256 token for the given subject
pub fn create_token(
    subject: &str,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(ttl_secs as i64);

    let claims = Claims {
        sub: subject.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Verifies a token's signature and expiry and returns its claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_round_trip() {
        let token = create_token("user@example.com", SECRET, DEFAULT_TOKEN_TTL_SECS).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "user@example.com");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_SECS as i64);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token("user@example.com", SECRET, DEFAULT_TOKEN_TTL_SECS).unwrap();
        assert!(matches!(
            verify_token(&token, "other-secret"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Expired well past the default validation leeway
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user@example.com".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&token, SECRET),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(matches!(
            verify_token("not.a.token", SECRET),
            Err(AuthError::InvalidToken)
        ));
    }
}
