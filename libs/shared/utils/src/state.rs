use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::Database;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::jwt::TokenService;
use crate::policy::{self, AccessPolicy, Action, AuthenticatedOnly, Resource};

/// Shared state handed to every cell router.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub tokens: TokenService,
    pub policy: Arc<dyn AccessPolicy>,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_minutes);
        Self {
            config: Arc::new(config),
            db,
            tokens,
            policy: Arc::new(AuthenticatedOnly),
        }
    }

    pub fn with_policy(mut self, policy: impl AccessPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn authorize(&self, user: &User, resource: Resource, action: Action) -> Result<(), AppError> {
        policy::authorize(self.policy.as_ref(), user, resource, action)
    }
}
