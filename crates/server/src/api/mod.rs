use std::sync::Arc;

use mailer::{EmailAttachment, Mailer, OutgoingEmail};
use shared::{
    domain::SubmissionRequest,
    error::{ApiError, ErrorCode},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct RelayContext {
    pub mailer: Arc<dyn Mailer>,
    pub owner_email: String,
    pub owner_name: String,
}

pub fn submit_form_route() -> &'static str {
    "/submit-form"
}

/// Forwards one validated submission as two sequential emails: the owner
/// notification first, then the submitter acknowledgment. The second is
/// only attempted once the first has gone out; a failure after that
/// point leaves the notification delivered and is reported as a delivery
/// error without rollback.
pub async fn relay_submission(
    ctx: &RelayContext,
    request: &SubmissionRequest,
) -> Result<(), ApiError> {
    request.validate()?;

    let notification = notification_email(ctx, request);
    ctx.mailer.send(&notification).await.map_err(|e| {
        error!(%e, "failed to send notification email");
        ApiError::new(ErrorCode::MailDelivery, "error sending email to recipient")
    })?;
    info!(to = %ctx.owner_email, "notification email sent");

    let acknowledgment = acknowledgment_email(ctx, request);
    ctx.mailer.send(&acknowledgment).await.map_err(|e| {
        error!(%e, "failed to send acknowledgment email");
        ApiError::new(
            ErrorCode::MailDelivery,
            "error sending confirmation email to user",
        )
    })?;
    info!(to = %request.fields.email, "acknowledgment email sent");

    Ok(())
}

fn notification_email(ctx: &RelayContext, request: &SubmissionRequest) -> OutgoingEmail {
    let fields = &request.fields;
    let mut email = OutgoingEmail::new(
        ctx.owner_email.clone(),
        "New Contact Form Submission",
        format!(
            "Name: {}\nEmail: {}\nMessage: {}",
            fields.fullname, fields.email, fields.message
        ),
    );
    if let Some(cv) = &request.cv {
        email = email.with_attachment(EmailAttachment {
            filename: cv.filename.clone(),
            media_type: cv.media_type.clone(),
            bytes: cv.bytes.clone(),
        });
    }
    email
}

fn acknowledgment_email(ctx: &RelayContext, request: &SubmissionRequest) -> OutgoingEmail {
    OutgoingEmail::new(
        request.fields.email.clone(),
        "Thank you for your submission",
        format!(
            "Dear {},\n\nThank you for reaching out. We have received your message \
             and will get back to you shortly.\n\nBest regards,\n{}.",
            request.fields.fullname, ctx.owner_name
        ),
    )
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
