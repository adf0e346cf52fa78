//! The transaction input form: whether it creates a new transaction or edits
//! an existing one, and the values currently typed into its fields.

use crate::transaction::{
    CreateTransactionInput, Transaction, TransactionType, UpdateTransactionInput,
};

/// What submitting the form does.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormMode {
    /// Submitting creates a new transaction.
    #[default]
    Idle,
    /// Submitting updates this transaction.
    Editing(Transaction),
}

/// The values in the form's input fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    /// The amount field.
    pub amount: f64,
    /// The transaction type selector.
    pub transaction_type: TransactionType,
    /// The description field.
    pub description: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            amount: 0.0,
            transaction_type: TransactionType::Expense,
            description: String::new(),
        }
    }
}

impl From<&Transaction> for FormFields {
    fn from(transaction: &Transaction) -> Self {
        Self {
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            description: transaction.description.clone(),
        }
    }
}

/// Tracks the form's mode and field values.
///
/// The fields always start from the mode's transaction (or the defaults in
/// [FormMode::Idle]). Editing a field never changes the mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormModeState {
    mode: FormMode,
    fields: FormFields,
}

impl FormModeState {
    /// A form in create mode with default field values.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current mode.
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// The current field values.
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Mutable access to the field values. Does not change the mode.
    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// The transaction being edited, if any.
    pub fn editing(&self) -> Option<&Transaction> {
        match &self.mode {
            FormMode::Idle => None,
            FormMode::Editing(transaction) => Some(transaction),
        }
    }

    /// Whether the form is editing an existing transaction.
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    /// Switch to editing `transaction`, replacing any unsaved values.
    pub fn start_edit(&mut self, transaction: Transaction) {
        self.fields = FormFields::from(&transaction);
        self.mode = FormMode::Editing(transaction);
    }

    /// Stop editing and discard unsaved values. Does nothing in create mode.
    pub fn cancel(&mut self) {
        if self.is_editing() {
            self.reset();
        }
    }

    /// Return to create mode with default values after a successful submit.
    pub fn submit_succeeded(&mut self) {
        self.reset();
    }

    /// Set the amount field.
    pub fn set_amount(&mut self, amount: f64) {
        self.fields.amount = amount;
    }

    /// Set the transaction type field.
    pub fn set_transaction_type(&mut self, transaction_type: TransactionType) {
        self.fields.transaction_type = transaction_type;
    }

    /// Set the description field.
    pub fn set_description(&mut self, description: &str) {
        self.fields.description = description.to_owned();
    }

    /// The input for creating a transaction from the current field values.
    pub fn create_input(&self) -> CreateTransactionInput {
        CreateTransactionInput::new(
            self.fields.amount,
            self.fields.transaction_type,
            &self.fields.description,
        )
    }

    /// The input for updating a transaction from the current field values.
    ///
    /// Includes every field the form shows. The date is left untouched.
    pub fn update_input(&self) -> UpdateTransactionInput {
        UpdateTransactionInput::default()
            .amount(self.fields.amount)
            .transaction_type(self.fields.transaction_type)
            .description(&self.fields.description)
    }

    fn reset(&mut self) {
        self.mode = FormMode::Idle;
        self.fields = FormFields::default();
    }
}
