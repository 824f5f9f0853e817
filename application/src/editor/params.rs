use serde_json::Value;

use crate::error::{AppError, AppResult};
use domain::operation::ParamBag;

/// Converts the JSON `params` object of a request into a [`ParamBag`].
///
/// `null` or an absent object yields an empty bag. Every value must be a
/// JSON number; strings such as `"1.5"` are rejected rather than coerced.
pub fn params_from_json(params: Option<&Value>) -> AppResult<ParamBag> {
    let object = match params {
        None | Some(Value::Null) => return Ok(ParamBag::new()),
        Some(Value::Object(object)) => object,
        Some(other) => {
            return Err(AppError::validation(format!(
                "params must be an object, got {}",
                json_kind(other)
            )));
        }
    };

    object
        .iter()
        .map(|(name, value)| match value.as_f64() {
            Some(number) => Ok((name.clone(), number)),
            None => Err(AppError::validation(format!(
                "Parameter '{name}' must be a number, got {}",
                json_kind(value)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
