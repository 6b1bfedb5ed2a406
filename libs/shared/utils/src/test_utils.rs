use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{Role, User};

use crate::state::AppState;

pub struct TestConfig {
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            token_ttl_minutes: 60,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            jwt_secret: self.jwt_secret.clone(),
            token_ttl_minutes: self.token_ttl_minutes,
            bind_addr: "127.0.0.1:0".to_string(),
        }
    }
}

/// Fresh application state over a private in-memory store with the schema applied.
pub async fn test_state() -> AppState {
    let db = shared_database::connect_in_memory()
        .await
        .expect("in-memory database");
    shared_database::bootstrap(&db).await.expect("schema bootstrap");
    AppState::new(TestConfig::default().to_app_config(), db)
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            email: "test@clinic.test".to_string(),
            role: Role::Receptionist,
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            role,
        }
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, Role::Admin)
    }

    pub fn receptionist(email: &str) -> Self {
        Self::new(email, Role::Receptionist)
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Builds tokens by hand so tests can forge the cases the token service never emits.
pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.email,
            "id": user.id,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_unsigned_token(user: &TestUser) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(json!({"alg": "none", "typ": "JWT"}).to_string());
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(
            json!({
                "sub": user.email,
                "id": user.id,
                "role": user.role,
                "iat": Utc::now().timestamp(),
                "exp": (Utc::now() + Duration::hours(1)).timestamp()
            })
            .to_string(),
        );
        format!("{}.{}.", header, payload)
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}
