use async_trait::async_trait;
use shared::{
    domain::is_valid_email,
    protocol::{EmailJsParams, EmailJsRequest},
};
use thiserror::Error;
use tracing::warn;

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";
pub const MISSING_FIELDS_ERROR: &str = "Please fill in all fields.";
pub const SUCCESS_FEEDBACK: &str = "Message sent successfully! I will get back to you soon.";
pub const GENERIC_SEND_ERROR: &str = "Failed to send message. Please try again.";

#[derive(Debug, Error)]
pub enum SendError {
    /// The provider rejected the request and supplied its own error text.
    #[error("{0}")]
    Provider(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Seam to the transactional-email provider, so the form flow is
/// testable without a network.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, request: &EmailJsRequest) -> Result<(), SendError>;
}

/// Fixed provider identifiers and owner metadata baked into every send.
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub owner_name: String,
    pub owner_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Hidden,
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Fullname,
    Email,
    Message,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    config: EmailJsConfig,
    fullname: String,
    email: String,
    message: String,
    feedback: Feedback,
    submit_enabled: bool,
    submit_label: String,
    sending: bool,
}

impl ContactForm {
    pub fn new(config: EmailJsConfig) -> Self {
        Self {
            config,
            fullname: String::new(),
            email: String::new(),
            message: String::new(),
            feedback: Feedback::Hidden,
            submit_enabled: false,
            submit_label: SUBMIT_LABEL.to_string(),
            sending: false,
        }
    }

    /// Input event: store the value and re-evaluate the submit control.
    pub fn set_field(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Fullname => self.fullname = value.to_string(),
            FormField::Email => self.email = value.to_string(),
            FormField::Message => self.message = value.to_string(),
        }
        self.refresh_validity();
    }

    /// Built-in-validity analogue: all three fields filled and the email
    /// field parses as an address.
    fn refresh_validity(&mut self) {
        self.submit_enabled = !self.fullname.is_empty()
            && !self.message.is_empty()
            && !self.email.is_empty()
            && is_valid_email(&self.email);
    }

    /// Submit flow. Validation failures short-circuit without touching
    /// the network; otherwise the control is disabled for the duration
    /// of the send and restored whatever the outcome.
    pub async fn submit(&mut self, sender: &dyn EmailSender) {
        self.feedback = Feedback::Hidden;

        if self.fullname.is_empty() || self.email.is_empty() || self.message.is_empty() {
            self.feedback = Feedback::Error(MISSING_FIELDS_ERROR.to_string());
            return;
        }

        self.submit_enabled = false;
        self.sending = true;
        self.submit_label = SENDING_LABEL.to_string();

        let request = self.build_request();
        match sender.send(&request).await {
            Ok(()) => {
                self.feedback = Feedback::Success(SUCCESS_FEEDBACK.to_string());
                self.reset_fields();
            }
            Err(error) => {
                warn!(%error, "contact form send failed");
                let text = match error {
                    SendError::Provider(text) if !text.is_empty() => text,
                    _ => GENERIC_SEND_ERROR.to_string(),
                };
                self.feedback = Feedback::Error(format!("Error: {text}"));
            }
        }

        // Restore the control on success and failure alike.
        self.sending = false;
        self.submit_label = SUBMIT_LABEL.to_string();
        self.submit_enabled = true;
    }

    fn build_request(&self) -> EmailJsRequest {
        let message = format!(
            "\nNew Contact Form Message:\n\
             ------------------------\n\
             Name: {fullname}\n\
             Email: {email}\n\
             \n\
             Message:\n\
             {message}\n\
             \n\
             ------------------------\n\
             This message was sent from your portfolio contact form.\n\
             To reply, simply respond to this email.\n",
            fullname = self.fullname,
            email = self.email,
            message = self.message,
        );
        EmailJsRequest {
            service_id: self.config.service_id.clone(),
            template_id: self.config.template_id.clone(),
            template_params: EmailJsParams {
                from_name: self.fullname.clone(),
                from_email: self.config.owner_email.clone(),
                reply_to: self.email.clone(),
                message,
                to_name: self.config.owner_name.clone(),
                to_email: self.config.owner_email.clone(),
                subject: format!("Portfolio Contact: {}", self.fullname),
                visitor_email: self.email.clone(),
            },
        }
    }

    fn reset_fields(&mut self) {
        self.fullname.clear();
        self.email.clear();
        self.message.clear();
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Fullname => &self.fullname,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn sending(&self) -> bool {
        self.sending
    }
}
