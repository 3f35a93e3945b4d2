//! Access to an Algorand node.
//!
//! [`LedgerClient`] is the only way the rest of the workspace reaches the
//! ledger. [`AlgodClient`] implements it against the algod v2 REST API.

mod algod;
mod client;

pub use algod::{AlgodClient, TOKEN_HEADER};
#[cfg(any(test, feature = "test-utils"))]
pub use client::MockLedgerClient;
pub use client::{LedgerClient, LedgerClientError};
