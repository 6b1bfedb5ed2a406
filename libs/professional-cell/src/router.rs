use axum::{middleware, routing::get, Router};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers::*;

pub fn professional_routes(state: AppState) -> Router {
    Router::new()
        .route("/profesionales", get(list_professionals).post(create_professional))
        .route("/profesionales/", get(list_professionals).post(create_professional))
        .route(
            "/profesionales/{id}",
            get(get_professional)
                .put(update_professional)
                .delete(delete_professional),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
