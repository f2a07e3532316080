pub mod config_service;
pub mod release_service;
pub mod types;
