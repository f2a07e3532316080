use crate::error::ApiError;
use serde::Deserialize;
use serde_json::Value;

pub const UPLOAD_ENDPOINT: &str = "/api/charts";

/// Chart repository reply to an upload
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UploadResponse {
    #[serde(default)]
    pub saved: Value,
    #[serde(default)]
    pub error: Value,
}

/// What the chart repository did with an uploaded archive
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Saved,
    Rejected(Option<String>),
}

impl UploadResponse {
    pub fn outcome(&self) -> UploadOutcome {
        if is_truthy(&self.saved) {
            return UploadOutcome::Saved;
        }
        let message = match &self.error {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
        UploadOutcome::Rejected(message)
    }
}

/// Interpret an upload response body. A body that is not a JSON object is an
/// [`ApiError::InvalidResponse`].
pub fn interpret_upload(body: &str) -> Result<UploadOutcome, ApiError> {
    let invalid = |message: String| ApiError::InvalidResponse {
        endpoint: UPLOAD_ENDPOINT.to_string(),
        message,
    };

    let value: Value = serde_json::from_str(body)
        .map_err(|e| invalid(format!("Failed to parse response: {}", e)))?;
    if !value.is_object() {
        return Err(invalid(format!("Expected a JSON object, got {}", value)));
    }

    let response: UploadResponse = serde_json::from_value(value)
        .map_err(|e| invalid(format!("Failed to parse response: {}", e)))?;
    Ok(response.outcome())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
