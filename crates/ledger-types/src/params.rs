use latinum_primitives::Round;
use serde::{Deserialize, Serialize};

use crate::serde_helpers::b64_array32;

/// Widest validity window the ledger accepts for a transaction, in rounds.
pub const MAX_VALID_ROUNDS: u64 = 1000;

/// Suggested parameters for building a transaction, as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkParams {
    #[serde(default)]
    pub consensus_version: String,

    /// Suggested fee per byte of signed transaction.
    pub fee: u64,

    /// Minimum fee for any transaction.
    pub min_fee: u64,

    #[serde(with = "b64_array32")]
    pub genesis_hash: [u8; 32],

    pub genesis_id: String,

    pub last_round: Round,
}

impl NetworkParams {
    /// First round a transaction built now is valid for.
    pub fn first_valid(&self) -> Round {
        self.last_round
    }

    /// Last round a transaction built now is valid for.
    pub fn last_valid(&self) -> Round {
        self.last_round.saturating_add(MAX_VALID_ROUNDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_node_response() {
        let json = r#"{
            "consensus-version": "future",
            "fee": 0,
            "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=",
            "genesis-id": "testnet-v1.0",
            "last-round": 41000000,
            "min-fee": 1000
        }"#;
        let params: NetworkParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.genesis_id, "testnet-v1.0");
        assert_eq!(params.min_fee, 1000);
        assert_eq!(params.first_valid(), Round::new(41_000_000));
        assert_eq!(params.last_valid(), Round::new(41_001_000));
    }
}
