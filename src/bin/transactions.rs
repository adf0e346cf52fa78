use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use clap::{Parser, Subcommand};
use time::{Date, macros::format_description};

use transaction_sync::{
    Alert, Config, CreateTransactionInput, DEFAULT_BASE_URL, Error, FormFields,
    HttpTransactionStore, Operation, Transaction, TransactionController, TransactionId,
    TransactionType, setup_logging,
};

/// Manage the transactions kept by the remote transaction service.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base URL of the transaction API.
    #[arg(long, env = "TRANSACTIONS_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// How many seconds to wait for each request before giving up.
    #[arg(long, env = "TRANSACTIONS_API_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Also write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every transaction.
    List,

    /// Create a transaction.
    Create {
        /// The amount of money, greater than zero.
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,

        /// Either "expense" or "income".
        #[arg(long = "type", default_value = "expense")]
        transaction_type: TransactionType,

        /// What the transaction was for.
        #[arg(long)]
        description: String,

        /// The date of the transaction as YYYY-MM-DD. Defaults to the date set by the service.
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },

    /// Change the fields of an existing transaction.
    Edit {
        /// The ID of the transaction to edit.
        id: String,

        /// The new amount.
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<f64>,

        /// The new type, either "expense" or "income".
        #[arg(long = "type")]
        transaction_type: Option<TransactionType>,

        /// The new description.
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a transaction after confirming.
    Delete {
        /// The ID of the transaction to delete.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

/// An operation that failed and why.
struct Failure {
    operation: Operation,
    error: Error,
}

impl Failure {
    fn of(operation: Operation) -> impl FnOnce(Error) -> Self {
        move |error| Self { operation, error }
    }
}

/// The fields given to `edit`. Fields that were not given keep their current value.
#[derive(Debug, Default)]
struct FieldOverrides {
    amount: Option<f64>,
    transaction_type: Option<TransactionType>,
    description: Option<String>,
}

impl FieldOverrides {
    fn apply(self, fields: &mut FormFields) {
        if let Some(amount) = self.amount {
            fields.amount = amount;
        }
        if let Some(transaction_type) = self.transaction_type {
            fields.transaction_type = transaction_type;
        }
        if let Some(description) = self.description {
            fields.description = description;
        }
    }
}

type Controller = TransactionController<HttpTransactionStore>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        eprintln!(
            "{}",
            Alert::error("Could not open the log file", &error.to_string())
        );
        return ExitCode::FAILURE;
    }

    let config = match Config::new(&args.base_url, Duration::from_secs(args.timeout_secs)) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", Alert::error_simple(&error.to_string()));
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Using transaction API at {}", config.base_url());

    let controller = TransactionController::new(HttpTransactionStore::new(config));

    match run(&controller, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure { operation, error }) => {
            eprintln!("{}", error.to_alert(operation));
            ExitCode::FAILURE
        }
    }
}

async fn run(controller: &Controller, command: Command) -> Result<(), Failure> {
    match command {
        Command::List => {
            controller
                .initialize()
                .await
                .map_err(Failure::of(Operation::Load))?;

            let transactions = controller.transactions();
            if transactions.is_empty() {
                println!("No transactions yet.");
            }
            for transaction in transactions.iter() {
                print_transaction(transaction);
            }
        }
        Command::Create {
            amount,
            transaction_type,
            description,
            date,
        } => {
            let mut input = CreateTransactionInput::new(amount, transaction_type, &description);
            if let Some(date) = date {
                input = input.created_at(date);
            }

            let created = controller
                .submit_create(input)
                .await
                .map_err(Failure::of(Operation::Create))?;

            println!("{}", Alert::success("Transaction created", created.id.as_str()));
            print_transaction(&created);
        }
        Command::Edit {
            id,
            amount,
            transaction_type,
            description,
        } => {
            controller
                .initialize()
                .await
                .map_err(Failure::of(Operation::Load))?;

            let id = TransactionId::new(id);
            let transaction = controller.find(&id).ok_or_else(|| Failure {
                operation: Operation::Update,
                error: Error::NotFound(id.clone()),
            })?;

            let overrides = FieldOverrides {
                amount,
                transaction_type,
                description,
            };
            controller.request_edit(transaction);
            controller.update_fields(|fields| overrides.apply(fields));

            let updated = controller
                .submit_form()
                .await
                .map_err(Failure::of(Operation::Update))?;

            println!("{}", Alert::success("Transaction updated", updated.id.as_str()));
            print_transaction(&updated);
        }
        Command::Delete { id, yes } => {
            controller
                .initialize()
                .await
                .map_err(Failure::of(Operation::Load))?;

            let id = TransactionId::new(id);
            let prompt = match controller.find(&id) {
                Some(transaction) => format!(
                    "Delete transaction {id} \"{}\"? [y/N] ",
                    transaction.description
                ),
                None => format!("Delete transaction {id}? [y/N] "),
            };
            controller.request_delete(id);

            if !yes && !confirm(&prompt) {
                controller.cancel_delete();
                println!("Delete cancelled.");
                return Ok(());
            }

            if let Some(deleted) = controller
                .confirm_delete()
                .await
                .map_err(Failure::of(Operation::Delete))?
            {
                println!("{}", Alert::success("Transaction deleted", deleted.as_str()));
            }
        }
    }

    Ok(())
}

fn print_transaction(transaction: &Transaction) {
    println!(
        "{:<8} {} {:>12.2} {:<7} {}",
        transaction.id.as_str(),
        transaction.created_at,
        transaction.amount,
        transaction.transaction_type.to_string(),
        transaction.description
    );
}

/// Ask a yes/no question on stdin. Anything but "y" or "yes" is a no.
fn confirm(prompt: &str) -> bool {
    print!("{prompt}");
    if let Err(error) = io::stdout().flush() {
        tracing::warn!("Could not show confirmation prompt: {error}");
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(error) => {
            tracing::error!("Could not read confirmation: {error}");
            false
        }
    }
}

fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
}
