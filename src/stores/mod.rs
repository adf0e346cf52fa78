//! Contains the trait and implementations for the remote store that persists
//! [transactions](crate::Transaction).

mod http;
mod transaction;

pub use http::HttpTransactionStore;
pub use transaction::TransactionStore;
