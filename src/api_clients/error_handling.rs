use log::debug;

use crate::error::AppError;

/// Error body shape the backend returns for non-2xx responses
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorResponse {
    code: Option<u16>,
    message: String,
    error_type: Option<String>,
}

/// Map a non-2xx backend response to an AppError
/// Structured error bodies keep their server message; anything else
/// falls back to the HTTP status class
pub fn map_api_error(status_code: u16, response_text: &str) -> AppError {
    debug!(
        "Mapping API error: status={}, response={}",
        status_code, response_text
    );

    if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(response_text) {
        let error_type = error_response
            .error_type
            .unwrap_or_else(|| "unknown_error".to_string());
        let message = error_response.message;

        match error_type.as_str() {
            "authentication_error" => {
                AppError::AuthError(format!("Authentication failed: {}", message))
            }
            "authorization_error" => AppError::AccessDenied(format!("Access denied: {}", message)),
            "validation_error" => AppError::ValidationError(message),
            "not_found" => AppError::NotFoundError(message),
            "conflict" => AppError::ConflictError(message),
            _ => {
                if let Some(code_val) = error_response.code {
                    map_by_status(
                        status_code,
                        &format!("{} (Server Code: {})", message, code_val),
                    )
                } else {
                    map_by_status(status_code, &message)
                }
            }
        }
    } else {
        map_by_status(status_code, response_text)
    }
}

fn map_by_status(status_code: u16, detail: &str) -> AppError {
    match status_code {
        400 => AppError::ValidationError(format!("Bad request: {}", detail)),
        401 => AppError::AuthError(format!("Authentication failed: {}", detail)),
        403 => AppError::AccessDenied(format!("Access denied: {}", detail)),
        404 => AppError::NotFoundError(format!("Resource not found: {}", detail)),
        409 => AppError::ConflictError(format!("Conflict: {}", detail)),
        429 => AppError::ApiError(format!("Rate limit exceeded: {}", detail)),
        500..=599 => AppError::ApiError(format!("Server error: {}", detail)),
        _ => AppError::ApiError(format!("API error ({}): {}", status_code, detail)),
    }
}
