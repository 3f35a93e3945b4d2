use async_trait::async_trait;
use latinum_ledger_types::{AccountInformation, NetworkParams, NodeStatus, PendingTransactionInfo};
use latinum_primitives::{Address, Round, TxId};
use thiserror::Error;

/// Client interface for the ledger node.
///
/// Every method is a single request with no retry.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Returns the suggested parameters for a transaction built now.
    async fn transaction_params(&self) -> Result<NetworkParams, LedgerClientError>;

    /// Submits an encoded signed transaction and returns its id.
    async fn send_raw_transaction(&self, raw: Vec<u8>) -> Result<TxId, LedgerClientError>;

    /// Returns what the node knows about a submitted transaction.
    async fn pending_transaction(
        &self,
        txid: TxId,
    ) -> Result<PendingTransactionInfo, LedgerClientError>;

    /// Returns the state of an account, including its holdings and the
    /// assets it created.
    async fn account_information(
        &self,
        address: Address,
    ) -> Result<AccountInformation, LedgerClientError>;

    /// Returns the node's current status.
    async fn status(&self) -> Result<NodeStatus, LedgerClientError>;

    /// Blocks until the node has seen a block after `round`, then returns its
    /// status.
    async fn status_after_round(&self, round: Round) -> Result<NodeStatus, LedgerClientError>;
}

/// Errors that can occur when talking to the node.
#[derive(Debug, Error)]
pub enum LedgerClientError {
    /// The node could not be reached or the connection broke.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with a non-success status.
    #[error("node rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The node's response did not have the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl LedgerClientError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn last_round(client: &impl LedgerClient) -> Result<Round, LedgerClientError> {
        Ok(client.status().await?.last_round)
    }

    #[tokio::test]
    async fn test_mock_passes_status_through() {
        let mut mock_client = MockLedgerClient::new();
        mock_client.expect_status().times(1).returning(|| {
            Ok(NodeStatus {
                last_round: Round::new(42),
                ..Default::default()
            })
        });

        assert_eq!(last_round(&mock_client).await.unwrap(), Round::new(42));
    }

    #[tokio::test]
    async fn test_mock_passes_error_through() {
        let mut mock_client = MockLedgerClient::new();
        mock_client
            .expect_status()
            .times(1)
            .returning(|| Err(LedgerClientError::transport("connection refused")));

        assert!(matches!(
            last_round(&mock_client).await,
            Err(LedgerClientError::Transport(_))
        ));
    }
}
