//! Command-line front end: argument types, route table, dispatcher and handlers.

pub mod command_handlers;
pub mod dispatcher;
pub mod main_types;
pub mod routes;
