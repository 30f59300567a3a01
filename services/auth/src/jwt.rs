//! JWT service for token issuance and verification
//!
//! Sessions are stateless HS256 bearer tokens with a fixed lifetime. There
//! is no server-side revocation list; a token dies by client-side deletion
//! or by expiring. Verification failures are deliberately uniform: the
//! caller cannot tell an expired token from a malformed or badly signed one.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

use crate::models::User;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 7 days)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: signing secret (required; startup fails without it)
    /// - `JWT_TOKEN_EXPIRY`: token lifetime in seconds (default: 604800)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string()) // 7 days
            .parse()
            .unwrap_or(604_800);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject user id
    pub sub: Uuid,
    /// Display email
    pub email: String,
    /// Display name
    pub name: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Uniform rejection for any token that fails verification
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid token")]
pub struct InvalidToken;

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            token_expiry: config.token_expiry,
        }
    }

    /// Issue a token for a user
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.display_name(),
            iat: now,
            exp: now + self.token_expiry,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token and return its claims
    ///
    /// Signature, structure, and expiry failures all collapse into the same
    /// [`InvalidToken`]; nothing about the token's state leaks to the caller.
    pub fn verify(&self, token: &str) -> Result<Claims, InvalidToken> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| InvalidToken)
    }

    /// Configured token lifetime in seconds
    pub fn token_expiry(&self) -> u64 {
        self.token_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serial_test::serial;

    fn service() -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "test-secret".to_string(),
            token_expiry: 604_800,
        })
    }

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ana".to_string(),
            last_name: "Lee".to_string(),
            age: 30,
            email: "ana@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            api_key: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = service();
        let user = sample_user();

        let token = service.issue(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.name, "Ana Lee");
        assert_eq!(claims.exp - claims.iat, service.token_expiry());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = service();
        let user = sample_user();

        // expired well past the validator's leeway
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.display_name(),
            iat: now_secs() - 7_200,
            exp: now_secs() - 3_600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(service.verify(&token), Err(InvalidToken));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let user = sample_user();
        let other = JwtService::new(&JwtConfig {
            secret: "a-different-secret".to_string(),
            token_expiry: 604_800,
        });

        let token = service().issue(&user).unwrap();
        assert_eq!(other.verify(&token), Err(InvalidToken));
    }

    #[test]
    fn test_rejection_is_uniform() {
        let service = service();
        let user = sample_user();

        let expired = {
            let claims = Claims {
                sub: user.id,
                email: user.email.clone(),
                name: user.display_name(),
                iat: now_secs() - 7_200,
                exp: now_secs() - 3_600,
            };
            let token = encode(
                &Header::new(Algorithm::HS256),
                &claims,
                &EncodingKey::from_secret(b"test-secret"),
            )
            .unwrap();
            service.verify(&token).unwrap_err()
        };
        let malformed = service.verify("definitely.not.a-token").unwrap_err();

        // expired and malformed are indistinguishable to the caller
        assert_eq!(expired, malformed);
    }

    #[test]
    #[serial]
    fn test_jwt_config_requires_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }

        assert!(JwtConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_jwt_config_from_env() {
        unsafe {
            std::env::set_var("JWT_SECRET", "super-secret");
            std::env::remove_var("JWT_TOKEN_EXPIRY");
        }

        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "super-secret");
        assert_eq!(config.token_expiry, 604_800);

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }
}
