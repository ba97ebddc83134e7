//! Transactions: signing bytes, validity, and application.
//!
//! Validity checks run in a fixed order and report the first failure; the
//! order is observable protocol behavior, not an implementation detail.
//! See [`Transaction::validate`].

use crate::canonical::{canonical_tx, decode_tx, tx_signing_bytes};
use crate::crypto::{verify_signature, Keypair};
use crate::error::{CodecError, TxError};
use crate::state::State;
use crate::types::{Address, Amount, ChainId, Nonce, Signature};

/// A signed transfer of `amount` from `from` to `to`.
///
/// The signature covers the signing bytes (which include the chain id) but
/// not itself; canonical transaction bytes carry all five fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
    pub nonce: Nonce,
    pub signature: Signature,
}

impl Transaction {
    /// Create and sign a transaction with `keypair` as the sender.
    pub fn signed(
        keypair: &Keypair,
        to: Address,
        amount: Amount,
        nonce: Nonce,
        chain_id: ChainId,
    ) -> Self {
        let from = keypair.address();
        let message = tx_signing_bytes(&from, &to, amount, nonce, chain_id);
        let signature = keypair.sign(&message);
        Self {
            from,
            to,
            amount,
            nonce,
            signature,
        }
    }

    /// The 92-byte message this transaction's signature must cover.
    pub fn signing_bytes(&self, chain_id: ChainId) -> Vec<u8> {
        tx_signing_bytes(&self.from, &self.to, self.amount, self.nonce, chain_id)
    }

    /// Encode to canonical 144 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        canonical_tx(self)
    }

    /// Decode from canonical bytes. Structural only; run [`validate`]
    /// against a state to judge the transaction.
    ///
    /// [`validate`]: Transaction::validate
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        decode_tx(bytes)
    }

    /// Verify the Ed25519 signature against the sender address.
    pub fn verify_signature(&self, chain_id: ChainId) -> Result<(), TxError> {
        let message = self.signing_bytes(chain_id);
        if verify_signature(&self.from, &message, &self.signature) {
            Ok(())
        } else {
            Err(TxError::InvalidSignature)
        }
    }

    /// Full validity against `state`, first failing check wins:
    ///
    /// 1. `amount != 0`, else [`TxError::AmountZero`]
    /// 2. `from != to`, else [`TxError::SelfTransfer`]
    /// 3. signature verifies, else [`TxError::InvalidSignature`]
    /// 4. nonce matches the account, else [`TxError::WrongNonce`]
    /// 5. sender can cover the amount, else [`TxError::InsufficientBalance`]
    /// 6. recipient balance fits in u64, else [`TxError::BalanceOverflow`]
    pub fn validate(&self, state: &State, chain_id: ChainId) -> Result<(), TxError> {
        if self.amount == 0 {
            return Err(TxError::AmountZero);
        }
        if self.from == self.to {
            return Err(TxError::SelfTransfer);
        }
        self.verify_signature(chain_id)?;

        let expected = state.get_nonce(&self.from);
        if self.nonce != expected {
            return Err(TxError::WrongNonce {
                expected,
                got: self.nonce,
            });
        }

        let have = state.get_balance(&self.from);
        if have < self.amount {
            return Err(TxError::InsufficientBalance {
                have,
                need: self.amount,
            });
        }

        state
            .get_balance(&self.to)
            .checked_add(self.amount)
            .ok_or(TxError::BalanceOverflow)?;
        Ok(())
    }

    /// Validate against `state` and, if valid, apply the transfer:
    /// debit the sender, credit the recipient, bump the sender's nonce.
    /// On error the state is untouched.
    pub fn apply(&self, state: &mut State, chain_id: ChainId) -> Result<(), TxError> {
        self.validate(state, chain_id)?;

        let from_balance = state.get_balance(&self.from);
        let to_balance = state.get_balance(&self.to);

        // All guarded by validate; still checked, never wrapping.
        let new_from = from_balance
            .checked_sub(self.amount)
            .ok_or(TxError::InsufficientBalance {
                have: from_balance,
                need: self.amount,
            })?;
        let new_to = to_balance
            .checked_add(self.amount)
            .ok_or(TxError::BalanceOverflow)?;
        let new_nonce = self.nonce.checked_add(1).ok_or(TxError::BalanceOverflow)?;

        state.set_balance(self.from, new_from);
        state.set_balance(self.to, new_to);
        state.set_nonce(self.from, new_nonce);
        Ok(())
    }
}
