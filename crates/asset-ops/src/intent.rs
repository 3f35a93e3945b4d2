//! What the caller wants done, before any network data is involved.

use latinum_ledger_types::{AssetSpec, ControlRoles};
use latinum_primitives::{Address, AssetId};

/// How the fee is chosen.
///
/// Only a fixed fee together with the flat flag overrides the network's
/// suggestion; any other combination uses the suggestion unmodified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeePolicy {
    pub fee: Option<u64>,
    pub flat_fee: bool,
}

impl FeePolicy {
    /// Uses the network's suggested fee.
    pub fn suggested() -> Self {
        Self::default()
    }

    /// Pays exactly `fee`.
    pub fn flat(fee: u64) -> Self {
        Self {
            fee: Some(fee),
            flat_fee: true,
        }
    }

    /// The fee to pay verbatim, if this policy fixes one.
    pub fn fixed_fee(&self) -> Option<u64> {
        self.fee.filter(|_| self.flat_fee)
    }
}

/// What happens to control roles left out of a creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleDefaults {
    /// Omitted reserve, freeze and clawback roles go to the manager.
    #[default]
    InheritFromManager,

    /// Omitted roles stay unset, which disables them for good.
    Explicit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAsset {
    pub creator: Address,
    pub spec: AssetSpec,
    pub roles: ControlRoles,
    pub role_defaults: RoleDefaults,
}

/// Replaces all four control roles of an existing asset. Signed by the
/// current manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconfigureAsset {
    pub asset_id: AssetId,
    pub manager: Option<Address>,
    pub roles: ControlRoles,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptIn {
    pub asset_id: AssetId,
    pub account: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferAsset {
    pub asset_id: AssetId,
    pub sender: Address,
    pub receiver: Address,
    pub amount: u64,
    pub revocation_target: Option<Address>,
    pub close_to: Option<Address>,
}

/// Freezes or unfreezes one holding. The requestor must hold the freeze role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreezeAsset {
    pub asset_id: AssetId,
    pub requestor: Address,
    pub target: Option<Address>,
    pub frozen: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentKind {
    Create(CreateAsset),
    Reconfigure(ReconfigureAsset),
    OptIn(OptIn),
    Transfer(TransferAsset),
    Freeze(FreezeAsset),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    pub kind: IntentKind,
    pub fee: FeePolicy,
    /// Opaque payload stored with the transaction.
    pub note: Vec<u8>,
}

impl TransactionIntent {
    pub fn new(kind: IntentKind) -> Self {
        Self {
            kind,
            fee: FeePolicy::default(),
            note: Vec::new(),
        }
    }

    pub fn with_fee(mut self, fee: FeePolicy) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_note(mut self, note: impl Into<Vec<u8>>) -> Self {
        self.note = note.into();
        self
    }
}
