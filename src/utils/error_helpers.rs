use crate::error::ApiError;

/// Helper functions for standardizing error conversions across the codebase.
/// Transport errors are classified once here, and [`describe_api_error`] turns
/// any [`ApiError`] into the single line shown to the user.
pub const NO_RESPONSE_MESSAGE: &str =
    "No response received from server. Please check your connection.";

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Convert reqwest errors to ApiError with endpoint context
pub fn convert_request_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    if error.is_builder() {
        ApiError::Request {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        }
    } else if error.is_decode() {
        convert_json_error(error, endpoint)
    } else if error.is_connect() || error.is_timeout() || error.is_request() || error.is_body() {
        ApiError::NoResponse {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        }
    } else {
        ApiError::Request {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        }
    }
}

/// Convert JSON deserialization errors to ApiError with endpoint context
pub fn convert_json_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: format!("Failed to parse response: {}", error),
    }
}

/// Human-readable message for a failed call. Pure: no logging, no side effects.
pub fn describe_api_error(error: &ApiError) -> String {
    match error {
        ApiError::Http {
            status,
            status_text,
            server_message,
            ..
        } => match server_message.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => format!("Error: {} - {}", status, status_text),
        },
        ApiError::NoResponse { .. } => NO_RESPONSE_MESSAGE.to_string(),
        ApiError::Request { message, .. } | ApiError::Decode { message, .. } => {
            if message.is_empty() {
                UNKNOWN_ERROR_MESSAGE.to_string()
            } else {
                message.clone()
            }
        }
    }
}
