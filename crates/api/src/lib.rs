//! risuspubl API server library.
//!
//! Exposes config, state, error handling, parameter extraction and routes so
//! integration tests and the binary entrypoint can both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod params;
pub mod router;
pub mod routes;
pub mod state;
