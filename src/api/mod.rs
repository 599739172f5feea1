//! API service modules for WDMMG endpoints.
//!
//! Each service covers one endpoint group and is obtained from
//! [`WdmmgClient`](crate::WdmmgClient).

mod accounts;
mod transactions;

pub use accounts::AccountsService;
pub use transactions::{TransactionsQuery, TransactionsService};
