use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staff role carried on every account and every token.
///
/// Both roles currently have identical access; see `AccessPolicy` in
/// `shared-utils` for where a distinction would be drawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(alias = "recepcionista")]
    Receptionist,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Receptionist => "receptionist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "receptionist" | "recepcionista" => Ok(Role::Receptionist),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Claims signed into every bearer token. `sub` is the account email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JwtClaims {
    pub sub: String,
    pub id: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated identity resolved from a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<JwtClaims> for User {
    fn from(claims: JwtClaims) -> Self {
        Self {
            id: claims.id,
            email: claims.sub,
            role: claims.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
