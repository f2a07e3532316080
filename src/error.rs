use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("HelmError: {0}")]
    Helm(#[from] HelmError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("VersionError: {0}")]
    Version(#[from] VersionError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Input aborted while prompting for {field}")]
    InputAborted { field: String },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },
    #[error("Upload of {archive} rejected: {message}")]
    UploadRejected { archive: String, message: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotInitialized { path: String },
    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },
}

#[derive(Error, Debug)]
pub enum HelmError {
    #[error("'{binary}' binary not found in PATH")]
    BinaryMissing { binary: String },
    #[error("'{command}' exited with status {status}")]
    ProcessFailed { command: String, status: i32 },
    #[error("'{command}' did not finish within {timeout_secs}s")]
    Timeout { command: String, timeout_secs: u64 },
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version '{version}': {reason}")]
    Invalid { version: String, reason: String },
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
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Helm(helm_error) => match helm_error {
                HelmError::BinaryMissing { .. } => ErrorSeverity::Critical,
                _ => ErrorSeverity::High,
            },
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Version(_) => ErrorSeverity::Low,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Config(ConfigError::NotInitialized { path }) => {
                format!("configuration file not found: {}", path)
            }
            AppError::Helm(HelmError::BinaryMissing { binary }) => {
                format!("'{}' is not installed", binary)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Config(ConfigError::NotInitialized { .. }) => {
                Some("Run 'asgard init' first".to_string())
            }
            AppError::Config(ConfigError::UnknownKey { .. }) => Some(format!(
                "Valid keys: {}",
                crate::storage::config::Config::keys()
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            AppError::Helm(HelmError::BinaryMissing { .. }) => {
                Some("Install helm or point --helm-bin / ASGARD_HELM_BIN at it".to_string())
            }
            AppError::Helm(HelmError::Timeout { .. }) => {
                Some("Raise --process-timeout or check the cluster connection".to_string())
            }
            AppError::Api(ApiError::InvalidResponse { .. }) => {
                Some("Check that helm.chart_repo points at a ChartMuseum server".to_string())
            }
            _ => None,
        }
    }

    /// Process exit code for this error: the wrapped binary's own status when
    /// it failed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Helm(HelmError::ProcessFailed { status, .. }) if *status != 0 => *status,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let cli_err = CliError::InvalidArguments("invalid arguments".to_string());
        assert_eq!(
            format!("{}", cli_err),
            "Invalid arguments: invalid arguments"
        );
        let cli_err = CliError::InputAborted {
            field: "helm.namespace".to_string(),
        };
        assert_eq!(
            format!("{}", cli_err),
            "Input aborted while prompting for helm.namespace"
        );
    }

    #[test]
    fn test_config_error_hint() {
        let app_err = AppError::Config(ConfigError::NotInitialized {
            path: "/tmp/asgard.toml".to_string(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);
        assert_eq!(
            app_err.display_friendly(),
            "configuration file not found: /tmp/asgard.toml"
        );
        assert_eq!(
            app_err.troubleshooting_hint(),
            Some("Run 'asgard init' first".to_string())
        );
    }

    #[test]
    fn test_helm_error_exit_code() {
        let app_err = AppError::Helm(HelmError::ProcessFailed {
            command: "helm list".to_string(),
            status: 3,
        });
        assert_eq!(app_err.exit_code(), 3);
        assert_eq!(
            format!("{}", app_err),
            "HelmError: 'helm list' exited with status 3"
        );

        let app_err = AppError::Helm(HelmError::BinaryMissing {
            binary: "helm".to_string(),
        });
        assert_eq!(app_err.exit_code(), 1);
        assert_eq!(app_err.severity(), ErrorSeverity::Critical);
        assert!(app_err.troubleshooting_hint().is_some());
    }

    #[test]
    fn test_api_errors_are_distinct() {
        let parse_err = ApiError::InvalidResponse {
            endpoint: "/api/charts".to_string(),
            message: "expected value".to_string(),
        };
        assert!(matches!(parse_err, ApiError::InvalidResponse { .. }));
        assert!(!matches!(parse_err, ApiError::Http { .. }));

        let app_err = AppError::Api(ApiError::Http {
            status: 502,
            endpoint: "/api/charts".to_string(),
            message: "bad gateway".to_string(),
        });
        assert_eq!(app_err.severity(), ErrorSeverity::High);
        assert_eq!(app_err.exit_code(), 1);
    }

    #[test]
    fn test_version_error_display() {
        let err = VersionError::Invalid {
            version: "latest".to_string(),
            reason: "unexpected character".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid version 'latest': unexpected character"
        );
        assert_eq!(AppError::Version(err).severity(), ErrorSeverity::Low);
    }
}
