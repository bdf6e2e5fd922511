use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical transaction record.
///
/// An instance only exists after the validator has accepted a raw payload,
/// so every field is guaranteed present and well-typed. The record is
/// immutable and moves by value from stage to stage; no stage holds on to
/// it after handing it forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Originating party, non-empty
    pub sender: String,

    /// Transaction amount (string-rendered for precision; may be negative)
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,

    /// ISO currency code or free-form currency label, non-empty
    pub currency: String,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        amount: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Transaction {
            sender: sender.into(),
            amount,
            currency: currency.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_serializes_as_string() {
        let tx = Transaction::new("Alice", Decimal::new(50025, 2), "USD");
        let json = serde_json::to_string(&tx).unwrap();

        assert!(json.contains("\"amount\":\"500.25\""));
        assert!(json.contains("\"sender\":\"Alice\""));
    }

    #[test]
    fn test_roundtrip() {
        let tx = Transaction::new("Bob", Decimal::from(-42), "EUR");
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();

        assert_eq!(back, tx);
    }
}
