//! Account models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::primitives::{deserialize_decimal_opt, AccountId};

/// An account visible to the API key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account id
    pub id: AccountId,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Bank or provider holding the account
    #[serde(default, alias = "institutionName")]
    pub institution_name: Option<String>,
    /// Kind of account (e.g. "checking", "savings", "credit")
    #[serde(default, alias = "accountType", alias = "type")]
    pub account_type: Option<String>,
    /// ISO 4217 currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// Current balance, when reported
    #[serde(default, deserialize_with = "deserialize_decimal_opt")]
    pub balance: Option<Decimal>,
    /// Provider status (e.g. "ACTIVE")
    #[serde(default)]
    pub status: Option<String>,
    /// When the account was created
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    /// Any fields not modelled above, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    /// Returns `true` unless the provider reports a non-active status.
    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .map_or(true, |s| s.eq_ignore_ascii_case("active"))
    }
}
