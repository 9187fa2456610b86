//! Customers REST API: HTTP client and wire models.

pub mod client;
pub mod models;

pub use client::{CustomerClient, DEFAULT_BASE_URL};
pub use models::{Customer, CustomerRequest, CustomerTier, ValidationError};
