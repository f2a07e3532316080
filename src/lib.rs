pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Version resolution and the init flow
pub mod storage; // Settings file

/// Support modules (used across layers)
pub mod api; // helm process wrapper and chart repository client
pub mod display; // Status output
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
