use latinum_primitives::Round;
use serde::{Deserialize, Serialize};

/// Node sync status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeStatus {
    pub last_round: Round,

    /// Nanoseconds since the last round was produced.
    #[serde(default)]
    pub time_since_last_round: u64,

    #[serde(default)]
    pub catchup_time: u64,
}
