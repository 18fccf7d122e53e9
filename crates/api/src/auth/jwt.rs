//! JWT access-token validation.
//!
//! Access tokens are HS256-signed JWTs issued by the identity provider and
//! shared-secret verified here. The service never mints tokens itself.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use skydd_core::types::DbId;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the customer's (or staff user's) internal database id.
    pub sub: DbId,
    /// The caller's role name (`"customer"` or `"admin"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for JWT token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var      | Required | Default |
    /// |--------------|----------|---------|
    /// | `JWT_SECRET` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self { secret }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature, expiration, and issued-at claims automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use skydd_core::roles::{ROLE_ADMIN, ROLE_CUSTOMER};

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        }
    }

    fn sign(claims: &Claims, config: &JwtConfig) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn valid_token_round_trips() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: 42,
                role: ROLE_CUSTOMER.to_string(),
                exp: now + 900,
                iat: now,
            },
            &config,
        );

        let claims = validate_token(&token, &config).expect("validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, ROLE_CUSTOMER);
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();
        // Expired well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: 1,
                role: ROLE_CUSTOMER.to_string(),
                exp: now - 300,
                iat: now - 600,
            },
            &config,
        );

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn different_secret_fails() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "some-other-secret".to_string(),
        };
        let now = chrono::Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: 1,
                role: ROLE_ADMIN.to_string(),
                exp: now + 900,
                iat: now,
            },
            &config_a,
        );

        assert!(validate_token(&token, &config_b).is_err());
    }
}
