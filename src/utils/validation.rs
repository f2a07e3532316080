//! Input validation
//!
//! Settings are passed to helm permissively; only the chart repository URL is
//! checked, because reqwest needs a well-formed base URL.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments(
            "Chart repository URL is empty; set helm.chart_repo with 'asgard init'".to_string(),
        )
        .into());
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

/// Validate a release or chart name argument
pub fn validate_name(kind: &str, name: &str) -> crate::Result<()> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidArguments(format!("{} name cannot be empty", kind)).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:8080").is_ok());
        assert!(validate_url("https://charts.example.com").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("charts.example.com").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Release", "web").is_ok());
        assert!(validate_name("Release", "").is_err());
        assert!(validate_name("Chart", "   ").is_err());
    }
}
