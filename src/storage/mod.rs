//! Storage layer for asgard
//!
//! Handles the persisted settings file (TOML).

use crate::error::StorageError;

pub mod config;

type Result<T> = std::result::Result<T, StorageError>;
