use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16, payload: Option<Value> },

    #[error("unexpected response format for {context}: {reason}")]
    Format { context: String, reason: String },

    #[error("validation failed: {payload}")]
    Validation { payload: Value },

    #[error("no collection selected")]
    NoCollectionSelected,
}

impl ClientError {
    pub fn format(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::Format {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Validation { .. } => Some(422),
            Self::Network(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Message shown next to the retry action of a view.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { payload } => format!("API validation error: {payload}"),
            Self::HttpStatus { status, payload } => {
                let detail = payload
                    .as_ref()
                    .and_then(backend_message)
                    .unwrap_or_else(|| format!("Request failed with status code {status}"));
                format!("API error ({status}): {detail}")
            }
            Self::Network(err) => format!("API error (unknown): {err}"),
            Self::Format { .. } => self.to_string(),
            Self::NoCollectionSelected => {
                "No collection selected. Please analyze an Instagram profile first.".to_string()
            }
        }
    }
}

pub fn backend_message(payload: &Value) -> Option<String> {
    match payload {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Object(map) => ["error", "message", "detail"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|value| match value {
                Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
                _ => None,
            }),
        _ => None,
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_message_carries_raw_payload() {
        let err = ClientError::Validation {
            payload: json!({"detail": [{"loc": ["body", "collection_name"]}]}),
        };
        let message = err.user_message();
        assert!(message.starts_with("API validation error: "));
        assert!(message.contains("collection_name"));
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn status_message_prefers_backend_text() {
        let err = ClientError::HttpStatus {
            status: 500,
            payload: Some(json!({"error": "actor crashed"})),
        };
        assert_eq!(err.user_message(), "API error (500): actor crashed");

        let bare = ClientError::HttpStatus {
            status: 404,
            payload: None,
        };
        assert_eq!(
            bare.user_message(),
            "API error (404): Request failed with status code 404"
        );
    }

    #[test]
    fn backend_message_ignores_non_text_fields() {
        assert_eq!(backend_message(&json!({"error": 3})), None);
        assert_eq!(
            backend_message(&json!({"message": "quota exceeded"})),
            Some("quota exceeded".to_string())
        );
        assert_eq!(backend_message(&json!("plain")), Some("plain".to_string()));
    }
}
