//! Shared response handling.
//!
//! Maps status codes onto [`ClientError`] so the client and the refresh
//! exchange stay focused on request construction.

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::ClientError;

/// Read a response as JSON.
///
/// - **204 No Content** → `Value::Null`
/// - **Non-success** → [`ClientError::Http`] with the body verbatim
/// - **Unparseable success body** → [`ClientError::Decode`]
pub async fn read_json(resp: reqwest::Response) -> Result<Value, ClientError> {
    let status = resp.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ClientError::Http {
            status: status.as_u16(),
            body: text,
        });
    }
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}
