use reqwest::StatusCode;
use thiserror::Error;

use crate::session::SessionError;

/// Класс ошибки по HTTP-статусу.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Server,
    Timeout,
    Connectivity,
    Other,
}

impl ErrorKind {
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            400 => ErrorKind::Validation,
            500 => ErrorKind::Server,
            _ => ErrorKind::Other,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Ответ с неуспешным статусом. `detail` - поле `error`/`message` из тела ответа.
    #[error("{}", describe_status(.status, .detail))]
    Http {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("Request timeout. Please check your connection.")]
    Timeout(#[source] reqwest::Error),
    #[error("Network error. Please check your internet connection.")]
    Network(#[source] reqwest::Error),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err)
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Http { status, .. } => ErrorKind::from_status(*status),
            ApiError::Timeout(_) => ErrorKind::Timeout,
            ApiError::Network(_) => ErrorKind::Connectivity,
            ApiError::Decode(_) | ApiError::InvalidUrl(_) | ApiError::Session(_) => {
                ErrorKind::Other
            }
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Исходный текст ошибки от сервера, если он был.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

fn describe_status(status: &StatusCode, detail: &Option<String>) -> String {
    match ErrorKind::from_status(*status) {
        ErrorKind::Unauthorized => "Session expired. Please login again.".to_string(),
        ErrorKind::Forbidden => "You do not have permission to perform this action.".to_string(),
        ErrorKind::NotFound => "The requested resource was not found.".to_string(),
        ErrorKind::Validation => detail
            .clone()
            .unwrap_or_else(|| "Invalid request. Please check your input.".to_string()),
        ErrorKind::Server => "Server error. Please try again later.".to_string(),
        _ => detail.clone().unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| "An error occurred".to_string())
        }),
    }
}

/// Достаёт текст ошибки из тела ответа: сначала `error`, потом `message`.
/// Непустое тело в виде простого текста тоже считается сообщением.
pub fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["error", "message"]
            .iter()
            .filter_map(|key| map.get(*key))
            .filter_map(|v| v.as_str())
            .find(|s| !s.is_empty())
            .map(str::to_string),
        Ok(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Ok(_) => None,
        Err(_) if !trimmed.starts_with('<') => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, detail: Option<&str>) -> ApiError {
        ApiError::Http {
            status: StatusCode::from_u16(status).unwrap(),
            detail: detail.map(str::to_string),
        }
    }

    #[test]
    fn status_messages() {
        assert_eq!(http(401, Some("x")).to_string(), "Session expired. Please login again.");
        assert_eq!(
            http(403, None).to_string(),
            "You do not have permission to perform this action."
        );
        assert_eq!(http(404, None).to_string(), "The requested resource was not found.");
        assert_eq!(http(500, Some("boom")).to_string(), "Server error. Please try again later.");
    }

    #[test]
    fn bad_request_prefers_server_text() {
        assert_eq!(http(400, Some("Seat already booked!")).to_string(), "Seat already booked!");
        assert_eq!(
            http(400, None).to_string(),
            "Invalid request. Please check your input."
        );
    }

    #[test]
    fn other_statuses_fall_back_to_reason_phrase() {
        assert_eq!(http(409, Some("Duplicate")).to_string(), "Duplicate");
        assert_eq!(http(502, None).to_string(), "Bad Gateway");
        assert_eq!(http(502, None).kind(), ErrorKind::Other);
    }

    #[test]
    fn detail_extraction_order() {
        assert_eq!(
            extract_detail(r#"{"error":"Bad Request","message":"Email already registered"}"#),
            Some("Bad Request".into())
        );
        assert_eq!(
            extract_detail(r#"{"message":"Email already registered"}"#),
            Some("Email already registered".into())
        );
        assert_eq!(extract_detail("Seat already booked!"), Some("Seat already booked!".into()));
        assert_eq!(extract_detail("<html>oops</html>"), None);
        assert_eq!(extract_detail("   "), None);
        assert_eq!(extract_detail("[1,2]"), None);
    }
}
