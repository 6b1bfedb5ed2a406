use axum::{middleware, routing::get, Router};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers::*;

pub fn treatment_routes(state: AppState) -> Router {
    Router::new()
        .route("/tratamientos", get(list_treatments).post(create_treatment))
        .route("/tratamientos/", get(list_treatments).post(create_treatment))
        .route(
            "/tratamientos/{id}",
            get(get_treatment).put(update_treatment).delete(delete_treatment),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
