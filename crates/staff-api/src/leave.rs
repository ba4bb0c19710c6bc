//! Leave request submission.

use serde::Serialize;
use serde_json::Value;
use staff_core::LeaveRequest;
use staff_core::normalize;

use crate::client::AuthenticatedClient;
use crate::error::SubmitError;

/// The leave form as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeaveRequestDraft {
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

impl LeaveRequestDraft {
    /// Names of required fields left blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("leave_type", &self.leave_type),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
            ("reason", &self.reason),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Submit a leave request for the signed-in employee.
///
/// Blank fields are reported without contacting the backend. The body is sent
/// once, in a single shape; a refusal surfaces the backend's per-field messages
/// as [`SubmitError::Rejected`].
///
/// # Errors
///
/// See [`SubmitError`].
pub async fn submit_leave_request(
    client: &AuthenticatedClient,
    draft: &LeaveRequestDraft,
) -> Result<LeaveRequest, SubmitError> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(SubmitError::Incomplete(missing));
    }

    let body = serde_json::to_value(draft).map_err(|e| SubmitError::Failed(e.to_string()))?;
    let url = client.endpoints().leave_requests();
    let created = client.post(&url, &body).await?;
    tracing::info!(leave_type = %draft.leave_type, "leave request submitted");

    // Some deployments answer 201 with an empty or partial body.
    let record = match created {
        Value::Object(_) => created,
        _ => body,
    };
    Ok(normalize::leave_request(&record, 1))
}
