use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::domain::Transaction;

use super::error::ValidationError;

/// Structurally verify a flat payload and normalize it into a Transaction.
///
/// The payload must already be unwrapped: envelope handling (`body.input`,
/// `input`, string-encoded bodies) happens once at the ingress boundary,
/// never here. Valid input passes through with identical field values.
/// No side effects.
pub fn validate(payload: &Value) -> Result<Transaction, ValidationError> {
    let fields = payload.as_object().ok_or_else(|| ValidationError::WrongType {
        field: "payload",
        reason: format!("expected a JSON object, got {}", json_type(payload)),
    })?;

    let sender = require_string(fields, "sender")?;
    let amount = require_amount(fields)?;
    let currency = require_string(fields, "currency")?;

    Ok(Transaction {
        sender,
        amount,
        currency,
    })
}

fn require_string(fields: &Map<String, Value>, name: &'static str) -> Result<String, ValidationError> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(name)),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::MissingField(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ValidationError::WrongType {
            field: name,
            reason: format!("expected a string, got {}", json_type(other)),
        }),
    }
}

fn require_amount(fields: &Map<String, Value>) -> Result<Decimal, ValidationError> {
    match fields.get("amount") {
        None | Some(Value::Null) => Err(ValidationError::MissingField("amount")),
        Some(Value::Number(n)) => {
            decimal_from_number(n).ok_or_else(|| ValidationError::WrongType {
                field: "amount",
                reason: format!("number {n} is out of representable range"),
            })
        }
        Some(other) => Err(ValidationError::WrongType {
            field: "amount",
            reason: format!("expected a number, got {}", json_type(other)),
        }),
    }
}

// JSON numbers are always finite, so only range overflow can fail here.
fn decimal_from_number(n: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    n.as_f64().and_then(Decimal::from_f64_retain)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
