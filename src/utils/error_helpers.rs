use crate::error::{ApiError, CliError, StorageError};
use std::io;
use std::path::Path;

/// Helper functions for standardizing error conversions across the codebase
/// Convert reqwest errors to ApiError with endpoint context
pub fn convert_request_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    ApiError::Http {
        status: error.status().map(|s| s.as_u16()).unwrap_or(0),
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert IO errors to StorageError with the offending path
pub fn convert_file_error(error: io::Error, path: &Path) -> StorageError {
    StorageError::FileIo {
        path: path.to_string_lossy().to_string(),
        source: error,
    }
}

/// Convert terminal IO errors during prompting to CliError
pub fn convert_prompt_error(error: io::Error, field: &str) -> CliError {
    CliError::InvalidArguments(format!("Failed to read {}: {}", field, error))
}

/// Helper macro for file errors
#[macro_export]
macro_rules! map_file_error {
    ($result:expr, $path:expr) => {
        $result.map_err(|e| $crate::utils::error_helpers::convert_file_error(e, $path))
    };
}
