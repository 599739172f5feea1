//! Primitive types and newtypes for type-safe API interactions.
//!
//! The API sends record ids as numbers on some endpoints and strings on
//! others; both are accepted and kept as strings.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use rust_decimal::Decimal;
use serde_json::Value;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserialize_id_string(deserializer).map(Self)
            }
        }
    };
}

string_id! {
    /// A strongly-typed account id.
    ///
    /// # Example
    ///
    /// ```
    /// use wdmmg::AccountId;
    ///
    /// let id = AccountId::new("acc_123");
    /// assert_eq!(id.to_string(), "acc_123");
    /// ```
    AccountId
}

string_id! {
    /// A strongly-typed transaction id.
    TransactionId
}

/// Deserialize an id that can be a number or a string.
fn deserialize_id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdValue {
        Int(i64),
        String(String),
    }

    match IdValue::deserialize(deserializer) {
        Ok(IdValue::Int(i)) => Ok(i.to_string()),
        Ok(IdValue::String(s)) => Ok(s),
        Err(_) => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Deserialize a flag where `null` or a missing value means `false`.
pub(crate) fn deserialize_bool_or_null<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserialize an optional decimal that can be a JSON number or string.
pub(crate) fn deserialize_decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .to_string()
            .parse::<Decimal>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        Some(Value::String(s)) => s
            .parse::<Decimal>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        Some(_) => Err(D::Error::custom("expected number or string for decimal")),
    }
}
