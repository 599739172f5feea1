//! Transaction models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::primitives::{deserialize_bool_or_null, deserialize_decimal_opt, AccountId, TransactionId};

/// A single posted or pending transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction id
    pub id: TransactionId,
    /// Account the transaction belongs to
    #[serde(default, alias = "accountId")]
    pub account_id: Option<AccountId>,
    /// Booking date, used for date-range filtering
    pub date: NaiveDate,
    /// Signed amount; negative values are debits
    #[serde(default, deserialize_with = "deserialize_decimal_opt")]
    pub amount: Option<Decimal>,
    /// ISO 4217 currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// Free-text description from the provider
    #[serde(default)]
    pub description: Option<String>,
    /// Merchant or counterparty name
    #[serde(default)]
    pub merchant: Option<String>,
    /// Category assigned by the provider
    #[serde(default)]
    pub category: Option<String>,
    /// Whether the transaction has not settled yet
    #[serde(default, alias = "isPending", deserialize_with = "deserialize_bool_or_null")]
    pub is_pending: bool,
    /// Any fields not modelled above, passed through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Returns `true` for money leaving the account.
    pub fn is_debit(&self) -> bool {
        self.amount.is_some_and(|a| a.is_sign_negative() && !a.is_zero())
    }

    /// Absolute value of the amount, zero if none was reported.
    pub fn magnitude(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO).abs()
    }
}
