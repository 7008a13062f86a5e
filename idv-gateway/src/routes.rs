//! Axum route handlers for the verification demo API.

use axum::{
    body::Body,
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        rejection::QueryRejection,
        DefaultBodyLimit, Multipart, Query,
    },
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use idv_core::{
    CoreError, SubmissionDraft, SubmissionReceipt, ValidationRules, VerificationResult,
    ID_FILE_FIELD, VALIDATION_RULES,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::debug;

use crate::{config::GatewayConfig, error::GatewayError};

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router.
pub fn create_router(config: &GatewayConfig) -> Router {
    Router::new()
        .route("/api/validation-rules", get(validation_rules))
        .route("/api/user-verification", get(verify_user))
        .route(
            "/api/submit",
            post(submit_form).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .route("/health", get(health))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            let request_id = req
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                request_id = %request_id,
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_policy())
}

/// Cross-origin policy: any origin, method and header, with credentials.
///
/// Browsers reject a literal `*` alongside credentials, so each allowance
/// mirrors what the request asked for.
#[must_use]
pub fn cors_policy() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /api/validation-rules` — the static form rules.
pub async fn validation_rules() -> Json<ValidationRules> {
    Json(VALIDATION_RULES)
}

/// `GET /api/user-verification?email=` — mocked verification lookup.
///
/// When `email` is repeated, the last occurrence is classified.
///
/// # Errors
/// Returns [`GatewayError::MissingInput`] if `email` is absent, or
/// [`GatewayError::InvalidRequest`] if the query string cannot be decoded.
pub async fn verify_user(
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<VerificationResult>, GatewayError> {
    let Query(params) = params.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let email = params
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "email").then_some(value))
        .ok_or(CoreError::MissingField { field: "email" })?;
    let result = VerificationResult::lookup(email);
    debug!(status = %result.status, "user verification lookup");
    Ok(Json(result))
}

/// `POST /api/submit` — echo a multipart form submission.
///
/// Text parts `name`, `email` and `dob` must be valid UTF-8; the `id_file`
/// part contributes only its declared filename and its bytes are drained.
/// Unknown parts are drained and ignored.
///
/// # Errors
/// Returns [`GatewayError::MissingInput`] if a required part is absent,
/// [`GatewayError::InvalidRequest`] if the body is not valid multipart or a
/// text part is not UTF-8, or
/// [`GatewayError::UploadTooLarge`] if the body limit is exceeded.
pub async fn submit_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SubmissionReceipt>, GatewayError> {
    let mut multipart = multipart.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let mut draft = SubmissionDraft::default();

    while let Some(field) = multipart.next_field().await? {
        let part = field.name().unwrap_or_default().to_owned();
        if part == ID_FILE_FIELD {
            let filename = field.file_name().map(str::to_owned);
            let bytes = discard(field).await?;
            // A part without a filename is a plain form value, not a file.
            if let Some(filename) = filename {
                debug!(filename = %filename, bytes, "discarded uploaded file");
                draft.filename = Some(filename);
            }
        } else if VALIDATION_RULES.required_fields.contains(&part.as_str()) {
            let value = read_text(field).await?;
            draft.set_text(&part, value);
        } else {
            discard(field).await?;
        }
    }

    let record = draft.finish()?;
    debug!(filename = %record.filename, "form submission accepted");
    Ok(Json(SubmissionReceipt::from(record)))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Read a text part, rejecting bytes that are not UTF-8.
async fn read_text(field: Field<'_>) -> Result<String, GatewayError> {
    let part = field.name().unwrap_or_default().to_owned();
    let bytes = field.bytes().await?;
    String::from_utf8(bytes.to_vec())
        .map_err(|e| GatewayError::InvalidRequest(format!("field '{part}' is not UTF-8: {e}")))
}

/// Read a part to the end without keeping it. Returns the byte count.
async fn discard(mut field: Field<'_>) -> Result<usize, MultipartError> {
    let mut total = 0;
    while let Some(chunk) = field.chunk().await? {
        total += chunk.len();
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method};
    use tower::ServiceExt;

    const BOUNDARY: &str = "idv-test-boundary";

    fn test_router() -> Router {
        create_router(&GatewayConfig::default())
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let body = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    fn multipart_request(body: impl Into<Body>) -> Request<Body> {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/submit")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(body.into());
        match req {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(filename: &str, contents: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"id_file\"; \
             filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n{contents}\r\n"
        )
    }

    fn closing() -> String {
        format!("--{BOUNDARY}--\r\n")
    }

    #[tokio::test]
    async fn health_response_format_returns_ok_with_status_field() {
        let (status, body) = send(test_router(), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn validation_rules_returns_static_record() {
        let (status, body) = send(test_router(), get_request("/api/validation-rules")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["min_age"], 18);
        assert_eq!(body["required_fields"], serde_json::json!(["name", "email", "dob"]));
        assert_eq!(
            body["allowed_file_types"],
            serde_json::json!(["image/png", "image/jpeg", "application/pdf"])
        );
    }

    #[tokio::test]
    async fn verify_user_classifies_and_echoes() {
        let (status, body) = send(
            test_router(),
            get_request("/api/user-verification?email=PENDING.user%40x.com"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Pending");
        assert_eq!(body["email"], "PENDING.user@x.com");
    }

    #[tokio::test]
    async fn verify_user_empty_email_is_not_found() {
        let (status, body) =
            send(test_router(), get_request("/api/user-verification?email=")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Not Found");
        assert_eq!(body["email"], "");
    }

    #[tokio::test]
    async fn verify_user_without_email_is_client_error() {
        let (status, body) = send(test_router(), get_request("/api/user-verification")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().is_some_and(|m| m.contains("email")));
    }

    #[tokio::test]
    async fn verify_user_repeated_email_uses_last_value() {
        let (status, body) = send(
            test_router(),
            get_request("/api/user-verification?email=a&email=pending%40x"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Pending");
        assert_eq!(body["email"], "pending@x");
    }

    #[tokio::test]
    async fn verify_user_ignores_unrelated_query_keys() {
        let (status, body) = send(
            test_router(),
            get_request("/api/user-verification?lang=en&email=someone%40x.com&lang=fr"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Not Found");
        assert_eq!(body["email"], "someone@x.com");
    }

    #[tokio::test]
    async fn submit_form_non_utf8_text_part_is_bad_request() {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(&[0xFF, 0xFE]);
        body.extend_from_slice(b"\r\n");
        for part in [
            text_part("email", "ada@example.com"),
            text_part("dob", "1815-12-10"),
            file_part("passport.png", "png"),
            closing(),
        ] {
            body.extend_from_slice(part.as_bytes());
        }
        let (status, body) = send(test_router(), multipart_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|m| m.contains("'name'")));
    }

    #[tokio::test]
    async fn submit_form_empty_text_part_is_unprocessable() {
        let body = [
            text_part("name", ""),
            text_part("email", "ada@example.com"),
            text_part("dob", "1815-12-10"),
            file_part("passport.png", "png"),
            closing(),
        ]
        .concat();
        let (status, body) = send(test_router(), multipart_request(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().is_some_and(|m| m.contains("'name'")));
    }

    #[tokio::test]
    async fn submit_form_echoes_fields_and_filename() {
        let body = [
            text_part("name", "Ada Lovelace"),
            text_part("email", "ada@example.com"),
            text_part("dob", "1815-12-10"),
            file_part("passport.png", "\u{89}PNG not really"),
            closing(),
        ]
        .concat();
        let (status, body) = send(test_router(), multipart_request(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Submission successful");
        assert_eq!(
            body["data"],
            serde_json::json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "dob": "1815-12-10",
                "filename": "passport.png",
            })
        );
    }

    #[tokio::test]
    async fn submit_form_missing_file_is_unprocessable() {
        let body = [
            text_part("name", "Ada"),
            text_part("email", "ada@example.com"),
            text_part("dob", "1815-12-10"),
            closing(),
        ]
        .concat();
        let (status, body) = send(test_router(), multipart_request(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().is_some_and(|m| m.contains("id_file")));
    }

    #[tokio::test]
    async fn submit_form_id_file_without_filename_counts_as_missing() {
        let body = [
            text_part("name", "Ada"),
            text_part("email", "ada@example.com"),
            text_part("dob", "1815-12-10"),
            text_part("id_file", "just text"),
            closing(),
        ]
        .concat();
        let (status, _) = send(test_router(), multipart_request(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn submit_form_with_json_body_is_bad_request() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/submit")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"));
        let req = match req {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let (status, body) = send(test_router(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string(), "error body must carry a message");
    }

    #[tokio::test]
    async fn submit_form_over_body_limit_is_rejected() {
        let mut config = GatewayConfig::default();
        config.max_upload_bytes = 64;
        let body = [
            text_part("name", "Ada"),
            text_part("email", "ada@example.com"),
            text_part("dob", "1815-12-10"),
            file_part("big.pdf", &"x".repeat(4096)),
            closing(),
        ]
        .concat();
        let (status, _) = send(create_router(&config), multipart_request(body)).await;
        assert!(status.is_client_error(), "expected 4xx, got {status}");
        assert_ne!(status, StatusCode::OK);
    }
}
