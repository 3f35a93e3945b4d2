//! Accounts: an address paired with the ed25519 key that signs for it.

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey};
use latinum_primitives::Address;
use rand_core::OsRng;

use crate::{
    error::MnemonicError,
    mnemonic::{mnemonic_from_seed, seed_from_mnemonic},
};

/// An address and its secret signing key.
///
/// The key is zeroized on drop and never printed.
#[derive(Clone)]
pub struct Account {
    address: Address,
    signing_key: SigningKey,
}

impl Account {
    /// Builds an account from a 32-byte ed25519 seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let address = Address::new(signing_key.verifying_key().to_bytes());
        Self {
            address,
            signing_key,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns the mnemonic phrase that resolves back to this account.
    pub fn to_mnemonic(&self) -> String {
        mnemonic_from_seed(self.signing_key.as_bytes())
    }

    /// Signs `message` with the account key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Derives the account behind a mnemonic phrase.
pub fn resolve_account(mnemonic: &str) -> Result<Account, MnemonicError> {
    let seed = seed_from_mnemonic(mnemonic)?;
    Ok(Account::from_seed(&seed))
}

/// Generates a fresh random account.
pub fn generate_account() -> Account {
    let signing_key = SigningKey::generate(&mut OsRng);
    let address = Address::new(signing_key.verifying_key().to_bytes());
    Account {
        address,
        signing_key,
    }
}
