use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use booking_cell::{booking_routes, BookingService};
use patient_cell::patient_routes;
use professional_cell::professional_routes;
use shared_utils::test_utils::{test_state, JwtTestUtils, TestConfig, TestUser};
use shared_utils::AppState;
use treatment_cell::treatment_routes;

async fn create_test_app() -> (Router, AppState) {
    let state = test_state().await;
    let app = Router::new()
        .merge(patient_routes(state.clone()))
        .merge(professional_routes(state.clone()))
        .merge(treatment_routes(state.clone()))
        .merge(booking_routes(state.clone()));
    (app, state)
}

fn valid_token() -> String {
    let user = TestUser::receptionist("desk@clinic.test");
    JwtTestUtils::create_test_token(&user, &TestConfig::default().jwt_secret, Some(1))
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    app.clone()
        .oneshot(request(method, uri, Some(&valid_token()), body))
        .await
        .unwrap()
}

async fn create(app: &Router, uri: &str, body: Value) -> String {
    let response = send(app, "POST", uri, Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {}", uri);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

struct Fixture {
    patient: String,
    professional: String,
    treatment: String,
}

async fn fixture(app: &Router) -> Fixture {
    let treatment = create(
        app,
        "/tratamientos/",
        json!({ "name": "Cleaning", "duration_minutes": 30, "price": "50.00" }),
    )
    .await;
    let patient = create(
        app,
        "/pacientes/",
        json!({ "first_name": "Ana", "last_name": "Lee", "phone": "555-1111" }),
    )
    .await;
    let professional = create(
        app,
        "/profesionales/",
        json!({ "full_name": "Dr. Rao", "type": "nurse" }),
    )
    .await;
    Fixture { patient, professional, treatment }
}

fn booking_body(f: &Fixture, start: &str, end: &str) -> Value {
    json!({
        "date": "2024-05-01",
        "start_time": start,
        "end_time": end,
        "patient_id": f.patient,
        "professional_id": f.professional,
        "treatment_id": f.treatment
    })
}

#[tokio::test]
async fn test_enriched_listing_joins_referenced_records() {
    let (app, _) = create_test_app().await;
    let f = fixture(&app).await;
    let id = create(&app, "/reservas/", booking_body(&f, "09:00", "09:30")).await;

    let response = send(&app, "GET", "/reservas/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row["id"], id);
    assert_eq!(row["treatment_name"], "Cleaning");
    assert_eq!(row["treatment_duration_minutes"], 30);
    assert_eq!(row["patient_first_name"], "Ana");
    assert_eq!(row["patient_last_name"], "Lee");
    assert_eq!(row["professional_full_name"], "Dr. Rao");
    assert_eq!(row["date"], "2024-05-01");
    assert_eq!(row["start_time"], "09:00:00");
    assert_eq!(row["end_time"], "09:30:00");
    assert_eq!(row["attention_status"], "confirmed");
    assert_eq!(row["payment_status"], "pending");
}

#[tokio::test]
async fn test_get_returns_plain_record() {
    let (app, _) = create_test_app().await;
    let f = fixture(&app).await;
    let id = create(&app, "/reservas", booking_body(&f, "09:00", "09:30")).await;

    let response = send(&app, "GET", &format!("/reservas/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let booking = body_json(response).await;
    assert_eq!(booking["id"], id);
    assert_eq!(booking["patient_id"], f.patient);
    assert_eq!(booking["professional_id"], f.professional);
    assert_eq!(booking["treatment_id"], f.treatment);
    assert!(booking["created_at"].is_string());
    assert!(booking.get("treatment_name").is_none());

    let response = send(&app, "GET", &format!("/reservas/{}", Uuid::new_v4()), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_replaces_statuses_and_times() {
    let (app, _) = create_test_app().await;
    let f = fixture(&app).await;
    let id = create(&app, "/reservas/", booking_body(&f, "09:00", "09:30")).await;
    let uri = format!("/reservas/{}", id);

    let mut body = booking_body(&f, "11:15", "11:45");
    body["attention_status"] = json!("atendida");
    body["payment_status"] = json!("paid");
    let response = send(&app, "PUT", &uri, Some(body)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let booking = body_json(send(&app, "GET", &uri, None).await).await;
    assert_eq!(booking["start_time"], "11:15:00");
    assert_eq!(booking["end_time"], "11:45:00");
    assert_eq!(booking["attention_status"], "attended");
    assert_eq!(booking["payment_status"], "paid");

    // omitted statuses go back to their defaults
    let response = send(&app, "PUT", &uri, Some(booking_body(&f, "11:15", "11:45"))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let booking = body_json(send(&app, "GET", &uri, None).await).await;
    assert_eq!(booking["attention_status"], "confirmed");
    assert_eq!(booking["payment_status"], "pending");

    let response = send(
        &app,
        "PUT",
        &format!("/reservas/{}", Uuid::new_v4()),
        Some(booking_body(&f, "09:00", "09:30")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overlapping_bookings_are_both_accepted() {
    let (app, state) = create_test_app().await;
    let f = fixture(&app).await;

    create(&app, "/reservas/", booking_body(&f, "09:00", "10:00")).await;
    create(&app, "/reservas/", booking_body(&f, "09:30", "10:30")).await;
    // end before start is stored as given
    create(&app, "/reservas/", booking_body(&f, "12:00", "11:00")).await;

    let stored = BookingService::new(&state.db).list().await.unwrap();
    assert_eq!(stored.len(), 3);
}

#[tokio::test]
async fn test_dangling_reference_is_a_conflict() {
    let (app, state) = create_test_app().await;
    let f = fixture(&app).await;

    let mut body = booking_body(&f, "09:00", "09:30");
    body["professional_id"] = json!(Uuid::new_v4());
    let response = send(&app, "POST", "/reservas/", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let mut body = booking_body(&f, "09:00", "09:30");
    body["patient_id"] = json!("not-a-uuid");
    let response = send(&app, "POST", "/reservas/", Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(BookingService::new(&state.db).list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_a_referenced_record_cascades() {
    let (app, state) = create_test_app().await;
    let f = fixture(&app).await;
    let other_patient = create(
        &app,
        "/pacientes/",
        json!({ "first_name": "Bo", "last_name": "Kim", "phone": "555-2222" }),
    )
    .await;

    create(&app, "/reservas/", booking_body(&f, "09:00", "09:30")).await;
    create(&app, "/reservas/", booking_body(&f, "10:00", "10:30")).await;
    let mut kept = booking_body(&f, "11:00", "11:30");
    kept["patient_id"] = json!(other_patient);
    let kept_id = create(&app, "/reservas/", kept).await;

    let response = send(&app, "DELETE", &format!("/pacientes/{}", f.patient), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining = BookingService::new(&state.db).list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id.to_string(), kept_id);

    let response = send(&app, "DELETE", &format!("/tratamientos/{}", f.treatment), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let rows = body_json(send(&app, "GET", "/reservas/", None).await).await;
    assert!(rows.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_a_professional_removes_their_bookings() {
    let (app, state) = create_test_app().await;
    let f = fixture(&app).await;

    create(&app, "/reservas/", booking_body(&f, "09:00", "09:30")).await;
    create(&app, "/reservas/", booking_body(&f, "09:15", "09:45")).await;
    assert_eq!(BookingService::new(&state.db).list().await.unwrap().len(), 2);

    let response = send(&app, "DELETE", &format!("/profesionales/{}", f.professional), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(BookingService::new(&state.db).list().await.unwrap().is_empty());
    let rows = body_json(send(&app, "GET", "/reservas/", None).await).await;
    assert!(rows.as_array().unwrap().is_empty());

    // the other referenced records are untouched
    let response = send(&app, "GET", &format!("/pacientes/{}", f.patient), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, "GET", &format!("/tratamientos/{}", f.treatment), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_booking() {
    let (app, _) = create_test_app().await;
    let f = fixture(&app).await;
    let id = create(&app, "/reservas/", booking_body(&f, "09:00", "09:30")).await;
    let uri = format!("/reservas/{}", id);

    assert_eq!(send(&app, "DELETE", &uri, None).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(send(&app, "DELETE", &uri, None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "GET", &uri, None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bookings_require_token() {
    let (app, state) = create_test_app().await;
    let f = fixture(&app).await;

    let response = app
        .clone()
        .oneshot(request("POST", "/reservas/", None, Some(booking_body(&f, "09:00", "09:30"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(request("GET", "/reservas/", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(BookingService::new(&state.db).list().await.unwrap().is_empty());
}
