use axum::{middleware, routing::get, Router};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers::*;

pub fn booking_routes(state: AppState) -> Router {
    Router::new()
        .route("/reservas", get(list_bookings).post(create_booking))
        .route("/reservas/", get(list_bookings).post(create_booking))
        .route(
            "/reservas/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
