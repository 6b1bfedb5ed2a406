use axum::{routing::get, Router};

use auth_cell::router::auth_routes;
use booking_cell::router::booking_routes;
use patient_cell::router::patient_routes;
use professional_cell::router::professional_routes;
use shared_utils::AppState;
use treatment_cell::router::treatment_routes;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic booking API is running!" }))
        .merge(auth_routes(state.clone()))
        .merge(patient_routes(state.clone()))
        .merge(professional_routes(state.clone()))
        .merge(treatment_routes(state.clone()))
        .merge(booking_routes(state))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use shared_utils::test_utils::test_state;

    use super::*;

    #[tokio::test]
    async fn test_liveness_is_public() {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Clinic booking API is running!");
    }

    #[tokio::test]
    async fn test_every_collection_is_gated() {
        let app = create_router(test_state().await);

        for uri in ["/user/", "/pacientes/", "/profesionales", "/tratamientos/", "/reservas"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {}", uri);
        }
    }

    #[tokio::test]
    async fn test_issued_token_opens_the_gate() {
        let app = create_router(test_state().await);

        let register = Request::builder()
            .method("POST")
            .uri("/auth/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "email": "desk@clinic.test", "password": "s3cret", "role": "receptionist" })
                    .to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(register).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let login = Request::builder()
            .method("POST")
            .uri("/auth/token")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("username=desk%40clinic.test&password=s3cret"))
            .unwrap();
        let response = app.clone().oneshot(login).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let token: Value = serde_json::from_slice(&body).unwrap();
        let token = token["access_token"].as_str().unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/reservas/")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
