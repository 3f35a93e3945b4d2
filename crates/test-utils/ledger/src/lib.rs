//! In-memory ledger for tests.
//!
//! [`FakeLedger`] implements [`LedgerClient`](latinum_ledger_client::LedgerClient)
//! over a simulated chain. It decodes and verifies submitted transactions,
//! rejects the ones the real ledger would refuse (missing opt-in, frozen
//! holdings, wrong role, dead validity window) and commits accepted ones when
//! the next round is produced.

mod ledger;
mod state;

pub use ledger::{ConfirmMode, FakeLedger, FAKE_GENESIS_ID, FAKE_MIN_FEE};
