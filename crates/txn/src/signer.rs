use latinum_key_derivation::Account;
use latinum_primitives::Address;

use crate::{errors::TxnError, signed::SignedTransaction, transaction::Transaction};

/// Something that can authorize transactions for one address.
pub trait TxSigner {
    fn address(&self) -> Address;

    /// Signs `txn`. Fails with [`TxnError::WrongSigner`] when `txn` is not
    /// sent from [`Self::address`].
    fn sign_transaction(&self, txn: &Transaction) -> Result<SignedTransaction, TxnError>;
}

impl TxSigner for Account {
    fn address(&self) -> Address {
        Account::address(self)
    }

    fn sign_transaction(&self, txn: &Transaction) -> Result<SignedTransaction, TxnError> {
        let signer = Account::address(self);
        if txn.sender() != signer {
            return Err(TxnError::WrongSigner {
                sender: txn.sender(),
                signer,
            });
        }

        let signature = self.sign(&txn.signing_bytes()?);
        Ok(SignedTransaction::new(txn.clone(), signature.to_bytes()))
    }
}
