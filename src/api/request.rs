use serde_json::Value;

use crate::pipeline::ValidationError;

/// Normalize an ingress body into the flat payload the pipeline consumes.
///
/// This is the single place envelope handling happens; the validator only
/// ever sees a flat payload. Accepted shapes, in precedence order:
///   - `{"body": {"input": ...}}` (HTTP-trigger envelope)
///   - `{"input": ...}` (bare wrapper)
///   - anything else is taken as the payload itself
/// A string-valued `input` is parsed as JSON; parse failure is an
/// unparsable-payload validation error.
pub fn unwrap_payload(body: Value) -> Result<Value, ValidationError> {
    let inner = match body {
        Value::Object(mut fields) => {
            let nested = fields
                .get_mut("body")
                .and_then(|b| b.as_object_mut())
                .and_then(|b| b.remove("input"));
            let wrapped = nested.or_else(|| fields.remove("input"));

            match wrapped {
                Some(input) => input,
                None => Value::Object(fields),
            }
        }
        other => other,
    };

    match inner {
        Value::String(raw) => {
            serde_json::from_str(&raw).map_err(|e| ValidationError::Unparsable(e.to_string()))
        }
        structured => Ok(structured),
    }
}
