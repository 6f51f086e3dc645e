use axum::{body, body::Body, http::Request};
use mailer::{Mailer, RecordingMailer};
use tower::ServiceExt;

use super::*;

const BOUNDARY: &str = "portfolio-test-boundary";

fn test_app() -> (Router, Arc<RecordingMailer>) {
    let recorder = Arc::new(RecordingMailer::new());
    let mailer: Arc<dyn Mailer> = recorder.clone();
    let relay = RelayContext {
        mailer,
        owner_email: "owner@example.com".into(),
        owner_name: "Portfolio Owner".into(),
    };
    let app = build_router(Arc::new(AppState { relay }));
    (app, recorder)
}

fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"cv\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn complete_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("fullname", "Jane Doe"),
        ("email", "jane@example.com"),
        ("message", "Hello"),
    ]
}

fn submit_request(body: Vec<u8>) -> Request<Body> {
    Request::post("/submit-form")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("content-length", body.len().to_string())
        .body(Body::from(body))
        .expect("request")
}

async fn error_body(response: axum::response::Response) -> ApiError {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("error json")
}

#[tokio::test]
async fn liveness_route_reports_running() {
    let (app, _recorder) = test_app();
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(bytes.as_ref(), b"Server is running!");
}

#[tokio::test]
async fn cross_origin_submissions_are_allowed() {
    let (app, _recorder) = test_app();
    let body = multipart_body(&complete_fields(), None);
    let request = Request::post("/submit-form")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("content-length", body.len().to_string())
        .header("origin", "https://portfolio.example.com")
        .body(Body::from(body))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn valid_submission_returns_success_and_sends_two_emails() {
    let (app, recorder) = test_app();
    let request = submit_request(multipart_body(&complete_fields(), None));
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert!(json.get("success").is_some());

    let sent = recorder.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "owner@example.com");
    assert!(sent[0].attachment.is_none());
    assert_eq!(sent[1].to, "jane@example.com");
}

#[tokio::test]
async fn cv_upload_is_attached_verbatim() {
    let (app, recorder) = test_app();
    let request = submit_request(multipart_body(
        &complete_fields(),
        Some(("jane-cv.pdf", "application/pdf", b"%PDF-1.4 jane")),
    ));
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let sent = recorder.sent();
    let attachment = sent[0].attachment.as_ref().expect("attachment");
    assert_eq!(attachment.filename, "jane-cv.pdf");
    assert_eq!(attachment.media_type, "application/pdf");
    assert_eq!(attachment.bytes, b"%PDF-1.4 jane");
}

#[tokio::test]
async fn oversized_request_is_rejected_before_any_email() {
    let (app, recorder) = test_app();
    let big = vec![0u8; 6 * 1024 * 1024];
    let request = submit_request(multipart_body(
        &complete_fields(),
        Some(("huge.pdf", "application/pdf", &big)),
    ));
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(recorder.sent().is_empty());
}

#[tokio::test]
async fn cv_above_the_per_file_cap_is_rejected() {
    let (app, recorder) = test_app();
    // Just over the attachment cap but under the request body limit, so
    // the per-file check is the one that fires.
    let big = vec![0u8; shared::domain::MAX_CV_BYTES + 1];
    let request = submit_request(multipart_body(
        &complete_fields(),
        Some(("big.pdf", "application/pdf", &big)),
    ));
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let error = error_body(response).await;
    assert_eq!(error.code, ErrorCode::PayloadTooLarge);
    assert!(recorder.sent().is_empty());
}

#[tokio::test]
async fn png_upload_is_rejected_as_unsupported() {
    let (app, recorder) = test_app();
    let request = submit_request(multipart_body(
        &complete_fields(),
        Some(("photo.png", "image/png", b"\x89PNG\r\n")),
    ));
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let error = error_body(response).await;
    assert_eq!(error.code, ErrorCode::UnsupportedMediaType);
    assert!(recorder.sent().is_empty());
}

#[tokio::test]
async fn missing_message_field_is_rejected() {
    let (app, recorder) = test_app();
    let request = submit_request(multipart_body(
        &[("fullname", "Jane Doe"), ("email", "jane@example.com")],
        None,
    ));
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = error_body(response).await;
    assert_eq!(error.code, ErrorCode::Validation);
    assert!(error.message.contains("message"));
    assert!(recorder.sent().is_empty());
}

#[tokio::test]
async fn malformed_email_field_is_rejected() {
    let (app, recorder) = test_app();
    let request = submit_request(multipart_body(
        &[
            ("fullname", "Jane Doe"),
            ("email", "not-an-address"),
            ("message", "Hello"),
        ],
        None,
    ));
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(recorder.sent().is_empty());
}

#[tokio::test]
async fn unknown_extra_fields_are_ignored() {
    let (app, recorder) = test_app();
    let mut fields = complete_fields();
    fields.push(("company", "Acme"));
    let request = submit_request(multipart_body(&fields, None));
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(recorder.sent().len(), 2);
}

#[tokio::test]
async fn cv_part_without_a_filename_is_treated_as_absent() {
    let (app, recorder) = test_app();
    let mut body = Vec::new();
    for (name, value) in complete_fields() {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"cv\"\r\n\r\n\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let response = app.oneshot(submit_request(body)).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let sent = recorder.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].attachment.is_none());
}

#[tokio::test]
async fn notification_failure_returns_500_and_skips_the_acknowledgment() {
    let (app, recorder) = test_app();
    recorder.fail_on(0);

    let request = submit_request(multipart_body(&complete_fields(), None));
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error = error_body(response).await;
    assert_eq!(error.code, ErrorCode::MailDelivery);
    assert!(recorder.sent().is_empty());
}

#[tokio::test]
async fn acknowledgment_failure_returns_500_with_the_notification_delivered() {
    let (app, recorder) = test_app();
    recorder.fail_on(1);

    let request = submit_request(multipart_body(&complete_fields(), None));
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let sent = recorder.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "owner@example.com");
}
