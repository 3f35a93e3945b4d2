//! algod v2 REST client.

use std::fmt;

use async_trait::async_trait;
use latinum_ledger_types::{AccountInformation, NetworkParams, NodeStatus, PendingTransactionInfo};
use latinum_primitives::{Address, Round, TxId};
use reqwest::{header::CONTENT_TYPE, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::*;

use crate::client::{LedgerClient, LedgerClientError};

/// Header carrying the node's API token.
pub const TOKEN_HEADER: &str = "X-Algo-API-Token";

/// HTTP client for an algod node. Cheap to clone.
#[derive(Clone)]
pub struct AlgodClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl fmt::Debug for AlgodClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgodClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct SubmitResponse {
    #[serde(rename = "txId")]
    tx_id: TxId,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl AlgodClient {
    /// Creates a client for the node at `host`, with `port` appended when
    /// given.
    pub fn new(host: &str, port: Option<u16>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url(host, port),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        trace!(%url, "GET");
        self.client.get(url).header(TOKEN_HEADER, &self.token)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, LedgerClientError> {
        let resp = req.send().await.map_err(from_reqwest)?;
        read_json(resp).await
    }
}

fn base_url(host: &str, port: Option<u16>) -> String {
    let host = host.trim_end_matches('/');
    match port {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    }
}

fn from_reqwest(err: reqwest::Error) -> LedgerClientError {
    if err.is_decode() {
        LedgerClientError::decode(err.to_string())
    } else {
        LedgerClientError::transport(err.to_string())
    }
}

/// Extracts the node's error message, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_owned())
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, LedgerClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.map_err(from_reqwest)?;
        return Err(LedgerClientError::rejected(
            status.as_u16(),
            error_message(&body),
        ));
    }
    resp.json().await.map_err(from_reqwest)
}

#[async_trait]
impl LedgerClient for AlgodClient {
    async fn transaction_params(&self) -> Result<NetworkParams, LedgerClientError> {
        self.fetch(self.get("/v2/transactions/params")).await
    }

    async fn send_raw_transaction(&self, raw: Vec<u8>) -> Result<TxId, LedgerClientError> {
        let url = format!("{}/v2/transactions", self.base_url);
        debug!(bytes = raw.len(), "submitting transaction");
        let req = self
            .client
            .post(url)
            .header(TOKEN_HEADER, &self.token)
            .header(CONTENT_TYPE, "application/x-binary")
            .body(raw);
        let resp: SubmitResponse = self.fetch(req).await?;
        Ok(resp.tx_id)
    }

    async fn pending_transaction(
        &self,
        txid: TxId,
    ) -> Result<PendingTransactionInfo, LedgerClientError> {
        self.fetch(self.get(&format!("/v2/transactions/pending/{txid}?format=json")))
            .await
    }

    async fn account_information(
        &self,
        address: Address,
    ) -> Result<AccountInformation, LedgerClientError> {
        self.fetch(self.get(&format!("/v2/accounts/{address}"))).await
    }

    async fn status(&self) -> Result<NodeStatus, LedgerClientError> {
        self.fetch(self.get("/v2/status")).await
    }

    async fn status_after_round(&self, round: Round) -> Result<NodeStatus, LedgerClientError> {
        self.fetch(self.get(&format!("/v2/status/wait-for-block-after/{round}")))
            .await
    }
}
