//! Implements a transaction store backed by the remote REST API.

use async_trait::async_trait;
use hyper::{
    Body, Client, Method, Request, StatusCode,
    client::HttpConnector,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    Error,
    config::Config,
    endpoints::{self, format_endpoint},
    logging::{log_request, log_response},
    stores::TransactionStore,
    transaction::{CreateTransactionInput, Transaction, UpdateTransactionInput},
    transaction_id::TransactionId,
};

/// Stores transactions in the remote store over HTTP.
///
/// Each operation is a single request with a JSON body, bounded by
/// [Config::request_timeout]. There are no retries.
#[derive(Debug, Clone)]
pub struct HttpTransactionStore {
    client: Client<HttpConnector>,
    config: Config,
}

impl HttpTransactionStore {
    /// Create a new store that talks to the server described by `config`.
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<RemoteResponse, Error> {
        let uri = format!("{}{}", self.config.base_url(), path);
        let body = body.unwrap_or_default();
        log_request(&method, &uri, &body);

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(&uri)
            .header(ACCEPT, "application/json");
        if !body.is_empty() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(Body::from(body))
            .map_err(|error| Error::Transport(format!("could not build request {uri}: {error}")))?;

        let timeout = self.config.request_timeout();
        let (status, bytes) = tokio::time::timeout(timeout, async {
            let response = self.client.request(request).await?;
            let status = response.status();
            let bytes = hyper::body::to_bytes(response.into_body()).await?;
            Ok::<_, hyper::Error>((status, bytes))
        })
        .await
        .map_err(|_| Error::Transport(format!("{method} {uri} timed out after {timeout:?}")))?
        .map_err(|error| Error::Transport(format!("{method} {uri} failed: {error}")))?;

        let body = String::from_utf8_lossy(&bytes).into_owned();
        log_response(&method, &uri, status, &body);

        Ok(RemoteResponse { status, body })
    }
}

#[async_trait]
impl TransactionStore for HttpTransactionStore {
    async fn list(&self) -> Result<Vec<Transaction>, Error> {
        let response = self.send(Method::GET, endpoints::TRANSACTIONS, None).await?;
        let transactions: Vec<Transaction> = decode(&response.into_result(None)?)?;

        for transaction in &transactions {
            check_stored(transaction)?;
        }

        Ok(transactions)
    }

    async fn create(&self, input: &CreateTransactionInput) -> Result<Transaction, Error> {
        let response = self
            .send(
                Method::POST,
                endpoints::CREATE_TRANSACTION,
                Some(encode(input)?),
            )
            .await?;
        let transaction = decode(&response.into_result(None)?)?;

        check_stored(&transaction)?;
        Ok(transaction)
    }

    async fn update(
        &self,
        id: &TransactionId,
        input: &UpdateTransactionInput,
    ) -> Result<Transaction, Error> {
        let path = format_endpoint(endpoints::UPDATE_TRANSACTION, id.as_str());
        let response = self
            .send(Method::PATCH, &path, Some(encode(input)?))
            .await?;

        let transaction = decode(&response.into_result(Some(id))?)?;

        check_stored(&transaction)?;
        Ok(transaction)
    }

    async fn delete(&self, id: &TransactionId) -> Result<(), Error> {
        let path = format_endpoint(endpoints::DELETE_TRANSACTION, id.as_str());
        let response = self.send(Method::DELETE, &path, None).await?;

        response.into_result(Some(id)).map(|_| ())
    }
}

struct RemoteResponse {
    status: StatusCode,
    body: String,
}

impl RemoteResponse {
    /// The response body if the status is a success, otherwise the matching [Error].
    ///
    /// `id` is the transaction the request targeted. A 404 is only reported as
    /// [Error::NotFound] for requests that target a transaction.
    fn into_result(self, id: Option<&TransactionId>) -> Result<String, Error> {
        if self.status.is_success() {
            return Ok(self.body);
        }

        match (self.status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => Err(Error::NotFound(id.clone())),
            (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => Err(
                Error::Validation(rejection_reason(self.status, &self.body)),
            ),
            (status, _) => Err(Error::Transport(format!(
                "the server responded with {status}"
            ))),
        }
    }
}

/// Pull a human readable reason out of an error response.
///
/// Servers commonly send `{"message": "..."}`, `{"message": ["...", "..."]}`
/// or `{"error": "..."}`. Plain text bodies are used as is.
fn rejection_reason(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("the request was rejected")
            .to_owned()
    };

    match serde_json::from_str::<Value>(body) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| message_from_json(value.get(*key)?))
            .unwrap_or_else(fallback),
        Err(_) if !body.trim().is_empty() => body.trim().to_owned(),
        Err(_) => fallback(),
    }
}

fn message_from_json(value: &Value) -> Option<String> {
    match value {
        Value::String(message) => Some(message.clone()),
        Value::Array(messages) => {
            let messages: Vec<&str> = messages.iter().filter_map(Value::as_str).collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value)
        .map_err(|error| Error::Transport(format!("could not serialize request body: {error}")))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body)
        .map_err(|error| Error::Transport(format!("malformed response: {error}")))
}

/// A transaction from the server that breaks the local rules is a malformed
/// response, not a problem with the user's input.
fn check_stored(transaction: &Transaction) -> Result<(), Error> {
    transaction.validate().map_err(|error| {
        Error::Transport(format!(
            "malformed response: transaction {}: {error}",
            transaction.id
        ))
    })
}
