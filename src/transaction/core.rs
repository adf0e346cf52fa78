//! Defines the core data models for transactions and their JSON wire format.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, transaction_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was spent or earned.
///
/// The remote store only accepts the two spellings below, any other value is
/// rejected when parsing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money spent.
    #[default]
    #[serde(rename = "DEPENSE")]
    Expense,
    /// Money earned.
    #[serde(rename = "REVENU")]
    Income,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Expense => f.write_str("Expense"),
            TransactionType::Income => f.write_str("Income"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    /// Parse either the English name (any case) or the exact wire spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPENSE" => Ok(TransactionType::Expense),
            "REVENU" => Ok(TransactionType::Income),
            other if other.eq_ignore_ascii_case("expense") => Ok(TransactionType::Expense),
            other if other.eq_ignore_ascii_case("income") => Ok(TransactionType::Income),
            other => Err(Error::Validation(format!(
                "\"{other}\" is not a transaction type, expected \"expense\" or \"income\""
            ))),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions only come from the remote store: see
/// [TransactionStore](crate::stores::TransactionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID the remote store assigned to the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// Whether the amount was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction was recorded.
    #[serde(with = "wire_date")]
    pub created_at: Date,
}

impl Transaction {
    /// Check a transaction received from the remote store against the same
    /// rules applied to local input.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the amount is not a number greater than
    /// zero or if the description is blank.
    pub fn validate(&self) -> Result<(), Error> {
        validate_amount(self.amount)?;
        validate_description(&self.description)
    }
}

/// The details needed to create a new [Transaction].
///
/// The ID is assigned by the remote store. If `created_at` is `None` the store
/// picks the date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionInput {
    /// The amount of money, must be greater than zero.
    pub amount: f64,
    /// A text description, must not be empty.
    pub description: String,
    /// Whether the amount was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The date of the transaction.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "wire_date::option"
    )]
    pub created_at: Option<Date>,
}

impl CreateTransactionInput {
    /// Start building a new transaction with no explicit date.
    pub fn new(amount: f64, transaction_type: TransactionType, description: &str) -> Self {
        Self {
            amount,
            description: description.to_owned(),
            transaction_type,
            created_at: None,
        }
    }

    /// Set the date of the transaction.
    pub fn created_at(mut self, date: Date) -> Self {
        self.created_at = Some(date);
        self
    }

    /// Check the input against the rules the remote store enforces.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the amount is not a number greater than
    /// zero or if the description is blank.
    pub fn validate(&self) -> Result<(), Error> {
        validate_amount(self.amount)?;
        validate_description(&self.description)
    }
}

/// A partial update to a [Transaction].
///
/// Only the fields that are `Some` are sent, and only those overwrite the
/// stored transaction.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionInput {
    /// The new amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// The new description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The new transaction type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// The new date.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "wire_date::option"
    )]
    pub created_at: Option<Date>,
}

impl UpdateTransactionInput {
    /// Set the new amount.
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the new description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Set the new transaction type.
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    /// Set the new date.
    pub fn created_at(mut self, date: Date) -> Self {
        self.created_at = Some(date);
        self
    }

    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.transaction_type.is_none()
            && self.created_at.is_none()
    }

    /// Check the fields that are present.
    ///
    /// # Errors
    /// Returns [Error::Validation] if a present amount is not greater than zero
    /// or a present description is blank.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }

        if let Some(description) = &self.description {
            validate_description(description)?;
        }

        Ok(())
    }
}

fn validate_amount(amount: f64) -> Result<(), Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(Error::Validation(
            "amount must be greater than zero".to_owned(),
        ))
    }
}

fn validate_description(description: &str) -> Result<(), Error> {
    if description.trim().is_empty() {
        Err(Error::Validation("description must not be empty".to_owned()))
    } else {
        Ok(())
    }
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// Dates are written as `YYYY-MM-DD`.
///
/// When reading, the first ten characters must be a `YYYY-MM-DD` date followed
/// by nothing or a time starting with `T`, so full ISO 8601 timestamps like
/// `2024-01-01T09:30:00.000Z` are accepted.
mod wire_date {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::{Date, macros::format_description};

    pub fn format(date: &Date) -> Result<String, time::error::Format> {
        date.format(format_description!("[year]-[month]-[day]"))
    }

    pub fn parse(text: &str) -> Result<Date, time::error::Parse> {
        let (date_part, rest) = text.split_at_checked(10).unwrap_or((text, ""));
        let format = format_description!("[year]-[month]-[day]");

        if !rest.is_empty() && !rest.starts_with('T') {
            // Fails on the trailing characters.
            return Date::parse(text, format);
        }

        Date::parse(date_part, format)
    }

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = format(date).map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(|error| de::Error::custom(format!("invalid date \"{text}\": {error}")))
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer, de, ser};
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => {
                    let text = super::format(date).map_err(ser::Error::custom)?;
                    serializer.serialize_some(&text)
                }
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|text| {
                    super::parse(&text).map_err(|error| {
                        de::Error::custom(format!("invalid date \"{text}\": {error}"))
                    })
                })
                .transpose()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
