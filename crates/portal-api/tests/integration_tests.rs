//! # Integration Tests for portal-api
//!
//! Drives the full router with `oneshot`: health probes, OpenAPI spec,
//! bearer-token enforcement, validation errors, registry proxying against a
//! wiremock registry (503 without client), CSV upload, and facility updates.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portal_api::state::AppState;
use portal_registry_client::{RegistryClient, RegistryConfig};

const TOKEN: &str = "Bearer test-token";
const BOUNDARY: &str = "portal-test-boundary";

/// Helper: build the test app with no registry client.
fn test_app() -> axum::Router {
    portal_api::app(AppState::new())
}

/// Helper: build the test app against a mock registry.
fn test_app_with_registry(mock_server: &MockServer) -> (axum::Router, AppState) {
    let config = RegistryConfig::local(&mock_server.uri()).unwrap();
    let state = AppState::with_registry(RegistryClient::new(config).unwrap());
    (portal_api::app(state.clone()), state)
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", TOKEN)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn csv_upload(uri: &str, csv: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"upload.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", TOKEN)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn successful(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "open-saber.registry.create",
        "ver": "1.0",
        "params": {"status": "SUCCESSFUL", "errmsg": ""},
        "responseCode": "OK",
        "result": result
    }))
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health/readiness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_is_served() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"]["/v1/facilities"]["put"].is_object());
    assert!(spec["components"]["schemas"]["Medicine"].is_object());
}

// -- Bearer Token -------------------------------------------------------------

#[tokio::test]
async fn test_missing_token_returns_401() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/programs")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name":"Polio"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

// -- Decode and Validation ----------------------------------------------------

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/medicines")
                .header("authorization", TOKEN)
                .body(Body::from("{\"name\":"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_invalid_program_returns_422_with_paths() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/v1/programs",
            json!({"name": "Polio", "status": "Deleted"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let details = body["error"]["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["path"], "status");
    assert_eq!(details[0]["reason"]["value"], "Deleted");
}

#[tokio::test]
async fn test_invalid_medicine_reports_every_violation() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/v1/medicines",
            json!({"name": "Covaxin", "status": "Recalled", "vaccinationMode": "topical"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    let paths: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["status", "vaccinationMode"]);
}

// -- Registry Proxy -----------------------------------------------------------

#[tokio::test]
async fn test_valid_program_returns_503_without_registry() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/v1/programs",
            json!({"name": "Polio", "status": "Active"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_create_program_forwards_to_registry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/add"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "request": {"Program": {"name": "Polio", "status": "active"}}
        })))
        .respond_with(successful(json!({"Program": {"osid": "1-p0l10"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, _) = test_app_with_registry(&mock_server);
    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/programs",
            json!({"name": "Polio", "status": "active"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["entityType"], "Program");
    assert_eq!(body["osid"], "1-p0l10");
}

#[tokio::test]
async fn test_registry_failure_returns_502_without_leaking() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/add"))
        .respond_with(ResponseTemplate::new(500).set_body_string("pg: db-internal-7 down"))
        .mount(&mock_server)
        .await;

    let (app, _) = test_app_with_registry(&mock_server);
    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/medicines",
            json!({"name": "OPV", "vaccinationMode": "oral"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_string(response).await;
    assert!(body.contains("UPSTREAM_ERROR"));
    assert!(!body.contains("db-internal-7"));
}

#[tokio::test]
async fn test_list_medicines_passes_query_as_filters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({
            "id": "open-saber.registry.search",
            "request": {
                "entityType": ["Medicine"],
                "filters": {"status": {"eq": "Active"}}
            }
        })))
        .respond_with(successful(json!({
            "Medicine": [{"osid": "1-a", "name": "Covaxin", "status": "Active"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, _) = test_app_with_registry(&mock_server);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/medicines?status=Active")
                .header("authorization", TOKEN)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Covaxin");
}

// -- CSV Upload ---------------------------------------------------------------

#[tokio::test]
async fn test_facility_upload_reports_each_rejected_row() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/add"))
        .and(body_partial_json(json!({
            "request": {"Facility": {"facilityName": "PHC Wagholi"}}
        })))
        .respond_with(successful(json!({"Facility": {"osid": "1-f"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, state) = test_app_with_registry(&mock_server);
    let csv = "facilityName,category,status,averageRating\n\
               PHC Wagholi,GOVT,Active,4.5\n\
               PHC Lohegaon,GOVT,Deleted,\n\
               PHC Kharadi,PRIVATE,Active,abc\n";
    let response = app
        .oneshot(csv_upload("/v1/facilities", csv))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["accepted"], 1);
    let rejected = body["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 2);
    assert_eq!(rejected[0]["row"], 2);
    assert!(rejected[0]["errors"][0].as_str().unwrap().starts_with("status:"));
    assert_eq!(rejected[1]["row"], 3);
    assert!(rejected[1]["errors"][0]
        .as_str()
        .unwrap()
        .contains("averageRating"));

    assert_eq!(state.metrics.rejected(), 2);
}

#[tokio::test]
async fn test_vaccinator_upload_splits_facility_ids() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/add"))
        .and(body_partial_json(json!({
            "id": "open-saber.registry.create",
            "request": {"Vaccinator": {
                "name": "Asha",
                "status": "Active",
                "facilityIds": ["F-1", "F-2"],
                "programs": [{"programId": "P-1", "certified": true}]
            }}
        })))
        .respond_with(successful(json!({"Vaccinator": {"osid": "1-v"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, state) = test_app_with_registry(&mock_server);
    let csv = "name,status,facilityIds,programId,certified\n\
               Asha,Active,\"F-1, F-2\",P-1,true\n\
               Ravi,Retired,F-3,,\n\
               Kiran,Active,F-4,P-2,maybe\n";
    let response = app
        .oneshot(csv_upload("/v1/vaccinators", csv))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["accepted"], 1);
    let rejected = body["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 2);
    assert_eq!(rejected[0]["row"], 2);
    assert!(rejected[0]["errors"][0].as_str().unwrap().starts_with("status:"));
    assert_eq!(rejected[1]["row"], 3);
    assert!(rejected[1]["errors"][0].as_str().unwrap().contains("certified"));
    assert_eq!(state.metrics.rejected(), 2);
}

#[tokio::test]
async fn test_enrollment_upload_nests_address_columns() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/add"))
        .and(body_partial_json(json!({
            "request": {"Enrollment": {
                "name": "Meera",
                "phone": "9000000001",
                "gender": "female",
                "address": {"district": "Pune", "pincode": "411014"}
            }}
        })))
        .respond_with(successful(json!({"Enrollment": {"osid": "1-e"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, _) = test_app_with_registry(&mock_server);
    let csv = "name,phone,gender,district,pincode\n\
               Meera,9000000001,female,Pune,411014\n\
               Sunil,9000000002,Unknown,Pune,411014\n";
    let response = app
        .oneshot(csv_upload("/v1/enrollments", csv))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["accepted"], 1);
    assert_eq!(body["rejected"][0]["row"], 2);
    assert!(body["rejected"][0]["errors"][0]
        .as_str()
        .unwrap()
        .starts_with("gender:"));
}

#[tokio::test]
async fn test_upload_without_file_field_returns_400() {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"other\"\r\n\r\n\
         nothing\r\n\
         --{BOUNDARY}--\r\n"
    );
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/vaccinators")
                .header("authorization", TOKEN)
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Facility Updates ---------------------------------------------------------

#[tokio::test]
async fn test_update_batch_with_invalid_element_is_rejected_whole() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/update"))
        .respond_with(successful(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (app, _) = test_app_with_registry(&mock_server);
    let response = app
        .oneshot(json_request(
            "PUT",
            "/v1/facilities",
            json!([
                {"osid": "1-a", "status": "Inactive"},
                {"osid": "1-b", "status": "Closed"}
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    let details = body["error"]["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["path"], "1.status");
}

#[tokio::test]
async fn test_update_batch_forwards_each_facility() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/update"))
        .and(body_partial_json(json!({
            "id": "open-saber.registry.update",
            "request": {"Facility": {"osid": "1-a"}}
        })))
        .respond_with(successful(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/update"))
        .and(body_partial_json(json!({
            "request": {"Facility": {"osid": "1-b"}}
        })))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such record"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, _) = test_app_with_registry(&mock_server);
    let response = app
        .oneshot(json_request(
            "PUT",
            "/v1/facilities",
            json!([
                {"osid": "1-a", "status": "Inactive"},
                {"osid": "1-b", "status": "active"}
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["updated"], 1);
    assert_eq!(body["failed"][0]["index"], 1);
    assert_eq!(body["failed"][0]["osid"], "1-b");
}

// -- Metrics ------------------------------------------------------------------

#[tokio::test]
async fn test_metrics_count_requests_and_errors() {
    let state = AppState::new();
    let app = portal_api::app(state.clone());

    let ok = Request::builder()
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap();
    let unauthorized = Request::builder()
        .uri("/v1/programs")
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(ok).await.unwrap();
    app.oneshot(unauthorized).await.unwrap();

    assert_eq!(state.metrics.requests(), 2);
    assert_eq!(state.metrics.errors(), 1);
}
