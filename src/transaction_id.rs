//! Transaction ID type definition.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The opaque identifier the remote store assigns to a transaction.
///
/// IDs are only ever read from store responses, the client never synthesizes one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap an ID string received from the remote store.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw ID string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
