//! Parameter descriptors: declared type, validator bounds and raw value.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Date;

/// The logical type a request parameter is validated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Int,
    Float,
    Str,
    Bool,
    Date,
}

/// Validator arguments attached to a parameter.
///
/// `Default` leaves every validator on its own defaults. The other variants
/// only apply to the matching [`ParamType`]; `None` on either side of a range
/// falls back to that validator's default for that side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Bounds {
    #[default]
    Default,
    Int {
        lower: Option<i64>,
        upper: Option<i64>,
    },
    Float {
        lower: Option<f64>,
        upper: Option<f64>,
    },
    Length {
        lower: usize,
        upper: usize,
    },
    Date {
        lower: Option<&'static str>,
        upper: Option<&'static str>,
    },
}

impl Bounds {
    pub const fn int(lower: i64, upper: i64) -> Self {
        Bounds::Int {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    pub const fn int_at_least(lower: i64) -> Self {
        Bounds::Int {
            lower: Some(lower),
            upper: None,
        }
    }

    pub const fn float_at_least(lower: f64) -> Self {
        Bounds::Float {
            lower: Some(lower),
            upper: None,
        }
    }

    pub const fn length(lower: usize, upper: usize) -> Self {
        Bounds::Length { lower, upper }
    }

    pub const fn date(lower: &'static str, upper: &'static str) -> Self {
        Bounds::Date {
            lower: Some(lower),
            upper: Some(upper),
        }
    }
}

/// A validated parameter value, tagged with its type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Date(Date),
}

impl ParamValue {
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Int(_) => ParamType::Int,
            ParamValue::Float(_) => ParamType::Float,
            ParamValue::Str(_) => ParamType::Str,
            ParamValue::Bool(_) => ParamType::Bool,
            ParamValue::Date(_) => ParamType::Date,
        }
    }

    /// Convert into a concrete field type, failing if the tag does not match.
    pub fn into_field<T: FromParamValue>(self, name: &str) -> Result<T, CoreError> {
        T::from_param_value(name, self)
    }
}

/// Field types a [`ParamValue`] can be unpacked into.
pub trait FromParamValue: Sized {
    const PARAM_TYPE: ParamType;

    fn from_param_value(name: &str, value: ParamValue) -> Result<Self, CoreError>;
}

fn mismatch(name: &str, expected: ParamType, value: &ParamValue) -> CoreError {
    CoreError::Internal(format!(
        "parameter {name}: expected a {expected:?} value, got {:?}",
        value.param_type()
    ))
}

macro_rules! impl_from_param_value {
    ($ty:ty, $variant:ident) => {
        impl FromParamValue for $ty {
            const PARAM_TYPE: ParamType = ParamType::$variant;

            fn from_param_value(name: &str, value: ParamValue) -> Result<Self, CoreError> {
                match value {
                    ParamValue::$variant(v) => Ok(v),
                    other => Err(mismatch(name, Self::PARAM_TYPE, &other)),
                }
            }
        }
    };
}

impl_from_param_value!(i64, Int);
impl_from_param_value!(f64, Float);
impl_from_param_value!(String, Str);
impl_from_param_value!(bool, Bool);
impl_from_param_value!(Date, Date);

/// One request field: how to validate it and what the client sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDescriptor {
    pub param_type: ParamType,
    pub bounds: Bounds,
    /// Raw value as extracted from the request. `None` means not supplied.
    pub value: Option<String>,
}

/// Static declaration of a parameter an entity accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub param_type: ParamType,
    pub bounds: Bounds,
    /// Whether the parameter may be absent when the entity is created.
    pub optional: bool,
}

impl ParamSpec {
    pub const fn required(name: &'static str, param_type: ParamType, bounds: Bounds) -> Self {
        Self {
            name,
            param_type,
            bounds,
            optional: false,
        }
    }

    pub const fn optional(name: &'static str, param_type: ParamType, bounds: Bounds) -> Self {
        Self {
            name,
            param_type,
            bounds,
            optional: true,
        }
    }
}

/// Names of the parameters in `specs` that may be absent on create.
pub fn optional_params(specs: &[ParamSpec]) -> BTreeSet<&'static str> {
    specs
        .iter()
        .filter(|spec| spec.optional)
        .map(|spec| spec.name)
        .collect()
}

/// Ordered mapping from parameter name to descriptor for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamBundle {
    params: IndexMap<String, ParamDescriptor>,
}

impl ParamBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(
        mut self,
        name: impl Into<String>,
        param_type: ParamType,
        bounds: Bounds,
        value: Option<&str>,
    ) -> Self {
        self.insert(name, param_type, bounds, value.map(str::to_string));
        self
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        param_type: ParamType,
        bounds: Bounds,
        value: Option<String>,
    ) {
        self.params.insert(
            name.into(),
            ParamDescriptor {
                param_type,
                bounds,
                value,
            },
        );
    }

    /// Tag every declared parameter with the raw value `lookup` finds for it.
    pub fn from_specs<F>(specs: &[ParamSpec], mut lookup: F) -> Result<Self, CoreError>
    where
        F: FnMut(&str) -> Result<Option<String>, CoreError>,
    {
        let mut bundle = Self::new();
        for spec in specs {
            let value = lookup(spec.name)?;
            bundle.insert(spec.name, spec.param_type, spec.bounds, value);
        }
        Ok(bundle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamDescriptor)> {
        self.params.iter().map(|(name, desc)| (name.as_str(), desc))
    }

    pub fn get(&self, name: &str) -> Option<&ParamDescriptor> {
        self.params.get(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// True when no parameter carries a value.
    pub fn all_null(&self) -> bool {
        self.params.values().all(|desc| desc.value.is_none())
    }
}

/// Validated values collected by the model builder, consumed by
/// [`Entity::build`](crate::entity::Entity::build).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedParams {
    values: IndexMap<String, ParamValue>,
}

impl ValidatedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take a value that must be present.
    pub fn required<T: FromParamValue>(&mut self, name: &str) -> Result<T, CoreError> {
        match self.values.shift_remove(name) {
            Some(value) => value.into_field(name),
            None => Err(CoreError::MissingParameter(name.to_string())),
        }
    }

    /// Take a value that may have been skipped as optional.
    pub fn optional<T: FromParamValue>(&mut self, name: &str) -> Result<Option<T>, CoreError> {
        self.values
            .shift_remove(name)
            .map(|value| value.into_field(name))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SPECS: &[ParamSpec] = &[
        ParamSpec::required("title", ParamType::Str, Bounds::Default),
        ParamSpec::optional("pages", ParamType::Int, Bounds::int(1, 10_000)),
    ];

    #[test]
    fn from_specs_keeps_declaration_order() {
        let bundle = ParamBundle::from_specs(SPECS, |name| {
            Ok((name == "title").then(|| "Dune".to_string()))
        })
        .unwrap();

        let names: Vec<&str> = bundle.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["title", "pages"]);
        assert_eq!(bundle.get("title").unwrap().value.as_deref(), Some("Dune"));
        assert_eq!(bundle.get("pages").unwrap().value, None);
        assert!(!bundle.all_null());
    }

    #[test]
    fn from_specs_propagates_lookup_errors() {
        let result = ParamBundle::from_specs(SPECS, |name| {
            Err(CoreError::Validation(format!("parameter {name}: bad shape")))
        });
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn optional_params_lists_only_optional_specs() {
        let optional = optional_params(SPECS);
        assert!(optional.contains("pages"));
        assert!(!optional.contains("title"));
    }

    #[test]
    fn validated_params_required_and_optional() {
        let mut values = ValidatedParams::new();
        values.insert("title", ParamValue::Str("Dune".into()));

        assert_eq!(values.required::<String>("title").unwrap(), "Dune");
        assert_eq!(values.optional::<i64>("pages").unwrap(), None);
        assert_matches!(
            values.required::<String>("title"),
            Err(CoreError::MissingParameter(name)) if name == "title"
        );
    }

    #[test]
    fn mismatched_field_type_is_internal() {
        let mut values = ValidatedParams::new();
        values.insert("pages", ParamValue::Str("many".into()));
        assert_matches!(values.required::<i64>("pages"), Err(CoreError::Internal(_)));
    }
}
