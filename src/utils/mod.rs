//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Error conversion and user-facing error messages
pub mod error_helpers;

/// Verbose console output and subscriber setup
pub mod logging;

/// Input validation utilities
pub mod validation;
