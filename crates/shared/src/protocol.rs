use serde::{Deserialize, Serialize};

/// Body of a `200` response from the submission relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitSuccess {
    pub success: String,
}

/// Template parameters expected by the transactional-email provider.
/// The field set is fixed by the provider's template, not by us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailJsParams {
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub message: String,
    pub to_name: String,
    pub to_email: String,
    pub subject: String,
    pub visitor_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailJsRequest {
    pub service_id: String,
    pub template_id: String,
    pub template_params: EmailJsParams,
}
