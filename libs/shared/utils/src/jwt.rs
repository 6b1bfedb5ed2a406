use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use shared_models::auth::{JwtClaims, Role, User};

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Error, Debug, PartialEq)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("token expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Issues and verifies HS256 bearer tokens with a shared secret.
///
/// There is no revocation: a token stays valid until its `exp` passes.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str, role: Role) -> Result<String, TokenError> {
        self.issue_with_ttl(user_id, email, role, self.ttl)
    }

    #[instrument(skip(self))]
    pub fn issue_with_ttl(
        &self,
        user_id: Uuid,
        email: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: email.to_string(),
            id: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    #[instrument(skip(self, token))]
    pub fn verify(&self, token: &str) -> Result<User, TokenError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;

        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                other => {
                    debug!("Token rejected: {:?}", other);
                    TokenError::Invalid
                }
            })?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }

        // valid only strictly before exp
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        debug!("Token validated successfully for user: {}", data.claims.id);
        Ok(User::from(data.claims))
    }
}
