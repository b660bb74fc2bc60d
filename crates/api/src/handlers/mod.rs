//! HTTP handlers.
//!
//! [`resource`] holds the CRUD handlers shared by every entity; [`author`]
//! adds the author-scoped book and manuscript endpoints.

pub mod author;
pub mod resource;
