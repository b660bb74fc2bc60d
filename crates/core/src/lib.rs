//! Parameter validation and model mutation for the risuspubl API.
//!
//! Every resource endpoint hands its raw request parameters to this crate:
//! the validators type-check and bounds-check them, the foreign-key table
//! confirms referenced rows exist, and [`commons::Commons`] builds, updates
//! or deletes entities through a [`store::Store`] implementation.

pub mod commons;
pub mod entity;
pub mod error;
pub mod foreign_key;
pub mod store;
pub mod types;
pub mod validation;
