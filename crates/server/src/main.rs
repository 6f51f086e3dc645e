use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{multipart::Field, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use mailer::SmtpMailer;
use shared::{
    domain::{CvAttachment, SubmissionFields, SubmissionRequest, MAX_CV_BYTES},
    error::{ApiError, ErrorCode},
    protocol::SubmitSuccess,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};
use tracing::info;

mod api;
mod app_state;
mod config;

use api::{relay_submission, submit_form_route, RelayContext};
use app_state::AppState;
use config::load_settings;

/// Multipart framing allowance on top of the per-file attachment cap.
const MAX_REQUEST_BYTES: usize = MAX_CV_BYTES + 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let from = if settings.smtp_from.is_empty() {
        settings.smtp_user.clone()
    } else {
        settings.smtp_from.clone()
    };
    let mailer = SmtpMailer::new(
        &settings.smtp_host,
        settings.smtp_port,
        &settings.smtp_user,
        &settings.smtp_password,
        &from,
    )?;

    let relay = RelayContext {
        mailer: Arc::new(mailer),
        owner_email: settings.owner_email,
        owner_name: settings.owner_name,
    };
    let app = build_router(Arc::new(AppState { relay }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "submission relay listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route(submit_form_route(), post(submit_form))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        // The form is served from a different origin than the relay.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn liveness() -> &'static str {
    "Server is running!"
}

async fn submit_form(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SubmitSuccess>, (StatusCode, Json<ApiError>)> {
    let request = parse_submission(multipart).await.map_err(reject)?;
    info!(
        fullname = %request.fields.fullname,
        email = %request.fields.email,
        cv_bytes = request.cv.as_ref().map_or(0, |cv| cv.bytes.len()),
        "form submission received"
    );

    relay_submission(&state.relay, &request)
        .await
        .map_err(reject)?;

    Ok(Json(SubmitSuccess {
        success: "Emails sent successfully".to_string(),
    }))
}

/// Pulls the submission out of the multipart body. Upload constraints
/// (media type, per-file size) are enforced here, before any relay
/// logic runs.
async fn parse_submission(mut multipart: Multipart) -> Result<SubmissionRequest, ApiError> {
    let mut fullname = String::new();
    let mut email = String::new();
    let mut message = String::new();
    let mut cv = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::new(
            ErrorCode::Validation,
            format!("malformed multipart body: {e}"),
        )
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "fullname" => fullname = read_text(field, "fullname").await?,
            "email" => email = read_text(field, "email").await?,
            "message" => message = read_text(field, "message").await?,
            "cv" => {
                // A cv part without a filename is treated as absent.
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let media_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::new(
                        ErrorCode::PayloadTooLarge,
                        format!("failed to read cv upload: {e}"),
                    )
                })?;
                let attachment = CvAttachment {
                    filename,
                    media_type,
                    bytes: bytes.to_vec(),
                };
                attachment.validate()?;
                cv = Some(attachment);
            }
            _ => {}
        }
    }

    let request = SubmissionRequest {
        fields: SubmissionFields {
            fullname,
            email,
            message,
        },
        cv,
    };
    request.fields.validate()?;
    Ok(request)
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String, ApiError> {
    field.text().await.map_err(|e| {
        ApiError::new(
            ErrorCode::Validation,
            format!("field '{name}' is not valid text: {e}"),
        )
    })
}

fn reject(error: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match error.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::MailDelivery | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(error))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
