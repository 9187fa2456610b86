//! Business logic layer: the customer store and the services it builds on.

pub mod services;
pub mod store;

pub use store::{CustomerStore, StoreState};
