use axum::{middleware, routing::get, Router};

use shared_utils::extractor::auth_middleware;
use shared_utils::AppState;

use crate::handlers::*;

pub fn patient_routes(state: AppState) -> Router {
    Router::new()
        .route("/pacientes", get(list_patients).post(create_patient))
        .route("/pacientes/", get(list_patients).post(create_patient))
        .route(
            "/pacientes/{id}",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
