use crate::api::models::ValidationError;
use crate::utils::error_helpers::describe_api_error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("No route matches '{path}'")]
    RouteNotFound { path: String },
    #[error("{action} failed: {message}")]
    ActionFailed { action: String, message: String },
}

/// Failure of a single call against the customers resource.
///
/// Variants follow what happened on the wire: the server answered with a
/// non-2xx status, nothing came back, the request never left the client, or
/// a 2xx body could not be decoded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("HTTP error: {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        endpoint: String,
        server_message: Option<String>,
        errors: Vec<ValidationError>,
    },
    #[error("No response from {endpoint}: {message}")]
    NoResponse { endpoint: String, message: String },
    #[error("Request to {endpoint} could not be sent: {message}")]
    Request { endpoint: String, message: String },
    #[error("Invalid response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// Field-level rejections carried by a failed create/update, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ApiError::Http { errors, .. } => errors,
            _ => &[],
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Http { endpoint, .. }
            | ApiError::NoResponse { endpoint, .. }
            | ApiError::Request { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::NoResponse { .. } => ErrorSeverity::High,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::Request { .. } => ErrorSeverity::Low,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Api(api_error) => describe_api_error(api_error),
            AppError::Cli(CliError::ActionFailed { message, .. }) => message.clone(),
            AppError::Config(ConfigError::ProfileNotFound { name }) => {
                format!("Profile '{}' not found", name)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::NoResponse { .. }) => Some(
                "Check that the customer service is running, or point --url / CUSTOMER_DESK_URL at it"
                    .to_string(),
            ),
            AppError::Api(api_error) if api_error.is_not_found() => {
                Some("'customer-desk list' to see the available customers".to_string())
            }
            AppError::Cli(CliError::RouteNotFound { .. }) => Some(
                "Known paths: /, /customers/new, /customers/<id>, /customers/<id>/edit".to_string(),
            ),
            AppError::Config(ConfigError::ProfileNotFound { .. }) => {
                Some("'customer-desk config set --profile <name> --url <url>'".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error(status: u16, server_message: Option<&str>) -> ApiError {
        ApiError::Http {
            status,
            status_text: "Bad Request".to_string(),
            endpoint: "/customers".to_string(),
            server_message: server_message.map(str::to_string),
            errors: vec![ValidationError {
                field: "email".to_string(),
                message: "invalid format".to_string(),
            }],
        }
    }

    #[test]
    fn test_cli_error_display() {
        let cli_err = CliError::InvalidArguments("invalid arguments".to_string());
        assert_eq!(
            format!("{}", cli_err),
            "Invalid arguments: invalid arguments"
        );

        let cli_err = CliError::RouteNotFound {
            path: "/nowhere".to_string(),
        };
        assert_eq!(format!("{}", cli_err), "No route matches '/nowhere'");
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            format!("{}", http_error(400, None)),
            "HTTP error: 400 Bad Request"
        );

        let api_err = ApiError::NoResponse {
            endpoint: "/customers".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            format!("{}", api_err),
            "No response from /customers: connection refused"
        );
    }

    #[test]
    fn test_api_error_accessors() {
        let api_err = http_error(404, Some("Customer not found"));
        assert_eq!(api_err.status(), Some(404));
        assert!(api_err.is_not_found());
        assert_eq!(api_err.endpoint(), "/customers");
        assert_eq!(api_err.validation_errors().len(), 1);

        let api_err = ApiError::Request {
            endpoint: "/customers/".to_string(),
            message: "Customer id must not be empty".to_string(),
        };
        assert_eq!(api_err.status(), None);
        assert!(!api_err.is_not_found());
        assert!(api_err.validation_errors().is_empty());
    }

    #[test]
    fn test_app_error_display_api() {
        let app_err = AppError::Api(http_error(400, Some("Invalid")));
        assert_eq!(
            format!("{}", app_err),
            "ApiError: HTTP error: 400 Bad Request"
        );
        assert_eq!(app_err.display_friendly(), "Invalid");
        assert_eq!(app_err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_severity_levels() {
        let app_err = AppError::Api(ApiError::NoResponse {
            endpoint: "/customers".to_string(),
            message: "timeout".to_string(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);
        assert!(app_err.troubleshooting_hint().is_some());

        let app_err = AppError::Api(http_error(503, None));
        assert_eq!(app_err.severity(), ErrorSeverity::High);

        let app_err = AppError::Config(ConfigError::ProfileNotFound {
            name: "staging".to_string(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);
        assert_eq!(app_err.display_friendly(), "Profile 'staging' not found");
    }

    #[test]
    fn test_troubleshooting_hints() {
        let app_err = AppError::Api(http_error(404, None));
        assert_eq!(
            app_err.troubleshooting_hint(),
            Some("'customer-desk list' to see the available customers".to_string())
        );

        let app_err = AppError::Cli(CliError::RouteNotFound {
            path: "/x".to_string(),
        });
        assert!(app_err.troubleshooting_hint().is_some());

        let app_err = AppError::Cli(CliError::InvalidArguments("x".to_string()));
        assert!(app_err.troubleshooting_hint().is_none());
    }

    #[test]
    fn test_action_failed_display_friendly() {
        let app_err = AppError::Cli(CliError::ActionFailed {
            action: "list".to_string(),
            message: "No response received from server. Please check your connection."
                .to_string(),
        });
        assert_eq!(
            app_err.display_friendly(),
            "No response received from server. Please check your connection."
        );
        assert_eq!(
            format!("{}", app_err),
            "CliError: list failed: No response received from server. Please check your connection."
        );
    }
}
