//! Type dispatch table: declared parameter type to validator.

use std::collections::HashMap;

use super::params::{Bounds, ParamType, ParamValue};
use super::validators::{validate_bool, validate_date, validate_float, validate_int, validate_str};
use crate::error::CoreError;

/// A validator adapted to the common shape: name, raw value, bounds.
pub type ValidatorFn = fn(&str, &str, &Bounds) -> Result<ParamValue, CoreError>;

/// Immutable mapping from [`ParamType`] to its validator.
///
/// Built once at startup and passed to the CRUD functions.
#[derive(Clone)]
pub struct ValidatorTable {
    validators: HashMap<ParamType, ValidatorFn>,
}

impl std::fmt::Debug for ValidatorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.validators.keys()).finish()
    }
}

impl ValidatorTable {
    /// A table with no validators registered.
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// The five built-in validators.
    pub fn standard() -> Self {
        Self::empty()
            .with(ParamType::Int, int_param)
            .with(ParamType::Float, float_param)
            .with(ParamType::Str, str_param)
            .with(ParamType::Bool, bool_param)
            .with(ParamType::Date, date_param)
    }

    pub fn with(mut self, param_type: ParamType, validator: ValidatorFn) -> Self {
        self.validators.insert(param_type, validator);
        self
    }

    pub fn get(&self, param_type: ParamType) -> Option<ValidatorFn> {
        self.validators.get(&param_type).copied()
    }

    /// Run the validator registered for `param_type`.
    pub fn validate(
        &self,
        name: &str,
        param_type: ParamType,
        raw: &str,
        bounds: &Bounds,
    ) -> Result<ParamValue, CoreError> {
        let validator = self.get(param_type).ok_or_else(|| {
            CoreError::Internal(format!("no validator registered for {param_type:?}"))
        })?;
        validator(name, raw, bounds)
    }
}

impl Default for ValidatorTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn misdeclared(name: &str, param_type: ParamType, bounds: &Bounds) -> CoreError {
    CoreError::Internal(format!(
        "parameter {name}: bounds {bounds:?} do not apply to a {param_type:?} parameter"
    ))
}

fn int_param(name: &str, raw: &str, bounds: &Bounds) -> Result<ParamValue, CoreError> {
    let (lower, upper) = match *bounds {
        Bounds::Default => (None, None),
        Bounds::Int { lower, upper } => (lower, upper),
        _ => return Err(misdeclared(name, ParamType::Int, bounds)),
    };
    validate_int(name, raw, lower, upper).map(ParamValue::Int)
}

fn float_param(name: &str, raw: &str, bounds: &Bounds) -> Result<ParamValue, CoreError> {
    let (lower, upper) = match *bounds {
        Bounds::Default => (None, None),
        Bounds::Float { lower, upper } => (lower, upper),
        _ => return Err(misdeclared(name, ParamType::Float, bounds)),
    };
    validate_float(name, raw, lower, upper).map(ParamValue::Float)
}

fn str_param(name: &str, raw: &str, bounds: &Bounds) -> Result<ParamValue, CoreError> {
    let (lower, upper) = match *bounds {
        Bounds::Default => (None, None),
        Bounds::Length { lower, upper } => (Some(lower), Some(upper)),
        _ => return Err(misdeclared(name, ParamType::Str, bounds)),
    };
    validate_str(name, raw, lower, upper).map(ParamValue::Str)
}

fn bool_param(name: &str, raw: &str, bounds: &Bounds) -> Result<ParamValue, CoreError> {
    if *bounds != Bounds::Default {
        return Err(misdeclared(name, ParamType::Bool, bounds));
    }
    validate_bool(name, raw).map(ParamValue::Bool)
}

fn date_param(name: &str, raw: &str, bounds: &Bounds) -> Result<ParamValue, CoreError> {
    let (lower, upper) = match *bounds {
        Bounds::Default => (None, None),
        Bounds::Date { lower, upper } => (lower, upper),
        _ => return Err(misdeclared(name, ParamType::Date, bounds)),
    };
    validate_date(name, raw, lower, upper).map(ParamValue::Date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    #[test]
    fn dispatches_each_type_to_its_validator() {
        let table = ValidatorTable::standard();

        assert_eq!(
            table.validate("n", ParamType::Int, "7", &Bounds::int(1, 10)).unwrap(),
            ParamValue::Int(7)
        );
        assert_eq!(
            table.validate("n", ParamType::Float, "2.5", &Bounds::Default).unwrap(),
            ParamValue::Float(2.5)
        );
        assert_eq!(
            table.validate("n", ParamType::Str, "ok", &Bounds::length(2, 2)).unwrap(),
            ParamValue::Str("ok".into())
        );
        assert_eq!(
            table.validate("n", ParamType::Bool, "yes", &Bounds::Default).unwrap(),
            ParamValue::Bool(true)
        );
        assert_eq!(
            table
                .validate("n", ParamType::Date, "2001-09-09", &Bounds::Default)
                .unwrap(),
            ParamValue::Date(NaiveDate::from_ymd_opt(2001, 9, 9).unwrap())
        );
    }

    #[test]
    fn bounds_are_forwarded() {
        let table = ValidatorTable::standard();
        assert_matches!(
            table.validate("n", ParamType::Int, "11", &Bounds::int(1, 10)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn misdeclared_bounds_are_internal() {
        let table = ValidatorTable::standard();
        assert_matches!(
            table.validate("n", ParamType::Str, "x", &Bounds::int(1, 10)),
            Err(CoreError::Internal(_))
        );
    }

    #[test]
    fn unregistered_type_is_internal() {
        let table = ValidatorTable::empty().with(ParamType::Int, int_param);
        assert_matches!(
            table.validate("n", ParamType::Bool, "true", &Bounds::Default),
            Err(CoreError::Internal(_))
        );
    }
}
