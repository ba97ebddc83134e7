//! Error taxonomy for transaction, block, and codec failures.
//!
//! Every validation failure is a value returned to the caller; the core
//! never panics on bad input. Transaction checks report the first failing
//! condition in the order the variants are declared below, and that order
//! is part of the protocol: two conforming implementations reject the same
//! transaction with the same error.

use thiserror::Error;

use crate::types::{Amount, BlockHeight, Hash32, Nonce};

/// Why a transaction was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TxError {
    /// Zero-amount transfers are forbidden.
    #[error("transaction amount is zero")]
    AmountZero,

    /// Sender and recipient are the same address.
    #[error("transfer to self is forbidden")]
    SelfTransfer,

    /// Ed25519 verification failed, or the sender bytes are not a valid
    /// public key.
    #[error("invalid signature")]
    InvalidSignature,

    /// Transaction nonce does not match the sender's account nonce.
    #[error("wrong nonce: expected {expected}, got {got}")]
    WrongNonce { expected: Nonce, got: Nonce },

    /// Sender balance cannot cover the amount.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    /// Applying the transfer would overflow a u64 counter.
    #[error("balance overflow")]
    BalanceOverflow,
}

/// Why a block was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockError {
    /// Block does not extend the current tip.
    #[error("bad parent: expected {expected}, got {got}")]
    BadParent { expected: Hash32, got: Hash32 },

    /// Block height is not tip height + 1.
    #[error("bad height: expected {expected}, got {got}")]
    BadHeight {
        expected: BlockHeight,
        got: BlockHeight,
    },

    /// A transaction in the block failed validation; the whole block is
    /// rejected at the first failing index.
    #[error("invalid transaction at index {index}: {cause}")]
    TxInvalid { index: usize, cause: TxError },

    /// The root claimed by the block does not match the recomputed root.
    #[error("bad state root: claimed {expected}, computed {computed}")]
    BadStateRoot { expected: Hash32, computed: Hash32 },
}

/// Why canonical bytes failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended before the layout was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Input continued past the end of the layout.
    #[error("trailing bytes after canonical value")]
    TrailingBytes,

    /// Block bytes do not start with the block domain tag.
    #[error("bad domain tag")]
    BadDomainTag,

    /// Declared transaction count does not fit the input.
    #[error("declared length overflows input")]
    LengthOverflow,
}
