use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers;

pub fn auth_routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth", post(handlers::register))
        .route("/auth/", post(handlers::register))
        .route("/auth/token", post(handlers::login));

    let protected_routes = Router::new()
        .route("/user", get(handlers::get_current_user))
        .route("/user/", get(handlers::get_current_user))
        .route("/user/password", put(handlers::change_password))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
