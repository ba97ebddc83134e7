//! Blocks: canonical bytes and the block hash.
//!
//! A block is an ordered batch of transactions plus the state root its
//! producer claims for the post-state. The hash covers the claimed root,
//! so two blocks with the same transactions but different claimed roots
//! are different blocks.

use crate::canonical::{canonical_block, decode_block};
use crate::crypto::sha256;
use crate::error::CodecError;
use crate::transaction::Transaction;
use crate::types::{BlockHeight, Hash32};

/// A block in the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Hash of the block this one extends; zero for genesis.
    pub parent_hash: Hash32,
    /// Height in the chain; genesis is 0.
    pub height: BlockHeight,
    /// Transactions in application order.
    pub txs: Vec<Transaction>,
    /// The root the producer claims for the state after applying `txs`.
    pub state_root: Hash32,
}

impl Block {
    /// Assemble a block.
    pub fn new(
        parent_hash: Hash32,
        height: BlockHeight,
        txs: Vec<Transaction>,
        state_root: Hash32,
    ) -> Self {
        Self {
            parent_hash,
            height,
            txs,
            state_root,
        }
    }

    /// `sha256` of the canonical block bytes.
    pub fn hash(&self) -> Hash32 {
        sha256(&canonical_block(self))
    }

    /// Encode to canonical bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        canonical_block(self)
    }

    /// Decode from canonical bytes. Structural only; the chain engine
    /// judges parent, height, transactions, and root.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        decode_block(bytes)
    }
}
