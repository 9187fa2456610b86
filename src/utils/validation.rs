//! Input validation utilities
//!
//! Checks applied to user input before it reaches the configuration file or
//! the customers API.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Reject empty or whitespace-only values for a required argument
pub fn validate_required(what: &str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(CliError::InvalidArguments(format!("{} cannot be empty", what)).into());
    }

    Ok(())
}
