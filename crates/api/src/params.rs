//! Request body to parameter bundle.
//!
//! Bodies are flat JSON objects. Scalars are rendered to the raw string the
//! validators parse, with integral floats written as integers; `null` or an
//! absent key means "not supplied". Keys an
//! entity does not declare are ignored.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use risuspubl_core::entity::Entity;
use risuspubl_core::error::CoreError;
use risuspubl_core::validation::ParamBundle;
use serde_json::{Map, Number, Value};

use crate::error::{AppError, AppResult};

/// A JSON object body, with the extractor rejection kept for reporting.
pub type JsonBody = Result<Json<Map<String, Value>>, JsonRejection>;

/// Unwrap an extracted body, turning a rejection into a 400.
pub fn body_object(body: JsonBody) -> AppResult<Map<String, Value>> {
    match body {
        Ok(Json(object)) => Ok(object),
        Err(rejection) => Err(AppError::BadRequest(format!(
            "Invalid JSON body: {}",
            rejection.body_text()
        ))),
    }
}

/// Tag each parameter `E` declares with the value supplied for it in `body`.
pub fn bundle_for<E: Entity>(body: &Map<String, Value>) -> AppResult<ParamBundle> {
    let bundle = ParamBundle::from_specs(E::PARAMS, |name| raw_value(name, body.get(name)))?;
    Ok(bundle)
}

fn raw_value(name: &str, value: Option<&Value>) -> Result<Option<String>, CoreError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(number_text(n))),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Array(_) | Value::Object(_)) => Err(CoreError::Validation(format!(
            "parameter {name}: expected a string, number or boolean"
        ))),
    }
}

/// Largest magnitude up to which every integer is exactly representable as
/// an `f64`.
const EXACT_F64_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Decimal text for a JSON number. Floats with no fractional part are
/// written without one, so `412.0` satisfies an integer parameter.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= EXACT_F64_INTEGER => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}
