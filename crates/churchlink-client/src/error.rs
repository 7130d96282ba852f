//! Classification of HTTP failures.

use churchlink_core::error::{AppError, ErrorKind};
use reqwest::StatusCode;

/// Build the error for a rejected request.
///
/// The response body is appended when it carries a FastAPI-style
/// `detail` message or short plain text.
pub fn status_error(context: &str, status: StatusCode, body: &str) -> AppError {
    let message = match extract_detail(body) {
        Some(detail) => format!("{context} failed with {status}: {detail}"),
        None => format!("{context} failed with {status}"),
    };
    match status {
        StatusCode::NOT_FOUND => AppError::not_found(message),
        StatusCode::UNAUTHORIZED => AppError::authentication(message),
        StatusCode::FORBIDDEN => AppError::authorization(message),
        StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => AppError::conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::validation(message),
        _ => AppError::external_service(message),
    }
}

/// Build the error for a request that never produced a response.
pub fn transport_error(context: &str, err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        format!("{context} timed out")
    } else {
        format!("{context} failed: {err}")
    };
    AppError::with_source(ErrorKind::ExternalService, message, err)
}

fn extract_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return match value.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        };
    }
    (body.len() <= 200).then(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let kind = |status| status_error("Load page", status, "").kind;
        assert_eq!(kind(StatusCode::NOT_FOUND), ErrorKind::NotFound);
        assert_eq!(kind(StatusCode::UNAUTHORIZED), ErrorKind::Authentication);
        assert_eq!(kind(StatusCode::FORBIDDEN), ErrorKind::Authorization);
        assert_eq!(kind(StatusCode::CONFLICT), ErrorKind::Conflict);
        assert_eq!(kind(StatusCode::PRECONDITION_FAILED), ErrorKind::Conflict);
        assert_eq!(kind(StatusCode::UNPROCESSABLE_ENTITY), ErrorKind::Validation);
        assert_eq!(kind(StatusCode::BAD_GATEWAY), ErrorKind::ExternalService);
    }

    #[test]
    fn test_status_error_uses_detail() {
        let err = status_error(
            "Save page 'home'",
            StatusCode::CONFLICT,
            r#"{"detail":"revision mismatch"}"#,
        );
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(
            err.message,
            "Save page 'home' failed with 409 Conflict: revision mismatch"
        );
    }

    #[test]
    fn test_status_error_without_body() {
        let err = status_error("Load header", StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.message, "Load header failed with 500 Internal Server Error");
    }
}
