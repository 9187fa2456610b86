//! Storage layer for customer-desk
//!
//! Handles configuration management: named profiles in a TOML file under the
//! user's config directory.

use crate::error::StorageError;

pub mod config;

type Result<T> = std::result::Result<T, StorageError>;
