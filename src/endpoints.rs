//! The remote transaction resource URIs, relative to the configured base URL.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}', use [format_endpoint].

/// The route to list all transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to create a transaction.
pub const CREATE_TRANSACTION: &str = "/transactions/createTransaction";
/// The route to partially update a transaction.
pub const UPDATE_TRANSACTION: &str = "/transactions/updateTransaction/{transaction_id}";
/// The route to delete a transaction.
pub const DELETE_TRANSACTION: &str = "/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with the percent-encoded `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        urlencoding::encode(id),
        &endpoint_path[param_end..]
    )
}
