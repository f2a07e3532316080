pub mod prompt;
pub mod services;
pub mod version;
