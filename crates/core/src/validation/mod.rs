//! Request parameter validation.
//!
//! Provides the parameter descriptor types, the five primitive validators and
//! the type dispatch table that picks a validator for a declared type. Pure
//! logic, no storage access.

pub mod dispatch;
pub mod params;
pub mod validators;

pub use dispatch::{ValidatorFn, ValidatorTable};
pub use params::{
    optional_params, Bounds, FromParamValue, ParamBundle, ParamDescriptor, ParamSpec, ParamType,
    ParamValue, ValidatedParams,
};
