//! # Wire Models
//!
//! Request and response shapes of the admin API. Field names follow the wire
//! format through `serde` renames; Rust-side names are snake_case.

pub mod company;
pub mod dashboard;
pub mod history;
pub mod lookup;
pub mod po_team;
pub mod signup;
pub mod user;

pub use company::*;
pub use dashboard::*;
pub use history::*;
pub use lookup::*;
pub use po_team::*;
pub use signup::*;
pub use user::*;

/// Lenient field decoders. The backend sends identifiers as strings on some
/// endpoints and numbers on others, and uses `null` for blank text.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        })
    }

    /// A non-negative count sent as a number, a numeric string or `null`.
    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(0),
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .ok_or_else(|| serde::de::Error::custom(format!("invalid count {n}"))),
            Value::String(s) if s.trim().is_empty() => Ok(0),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid count {s:?}"))),
            other => Err(serde::de::Error::custom(format!("invalid count {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_decode_from_numbers_and_nulls() {
        let option: LookupOption = serde_json::from_value(json!({"id": 42, "text": null})).unwrap();
        assert_eq!(option.id, "42");
        assert_eq!(option.text, "");
    }
}
