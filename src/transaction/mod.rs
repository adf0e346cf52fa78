//! Transaction models for the budgeting client.
//!
//! This module contains the `Transaction` model, the typed inputs for creating
//! and updating transactions, and the JSON wire format shared with the remote
//! store.

mod core;

pub use core::{CreateTransactionInput, Transaction, TransactionType, UpdateTransactionInput};
