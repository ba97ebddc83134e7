//! # Cakechain Core
//!
//! Deterministic state-transition core of the Cakechain protocol: an
//! account-based ledger with a linear chain rule.
//!
//! The core validates and applies transactions and blocks against an
//! in-memory state and defines the canonical byte encodings used for
//! hashing and signing. It is pure computation: no networking, no mempool,
//! no consensus, no persistence. Embedders drive it as a library.
//!
//! ## Core Types
//!
//! - [`Transaction`] - A signed transfer between two accounts
//! - [`Block`] - An ordered batch of transactions with a claimed state root
//! - [`Chain`] - The engine: tip, state, and block acceptance
//! - [`State`] - Balances and nonces with a deterministic root
//!
//! ## Core Invariants
//!
//! 1. **Bit-exact encodings**: every hash and signature input is a frozen
//!    byte layout with domain separation
//! 2. **First-failure errors**: validation reports the first failing check
//!    in a fixed order, identically across implementations
//! 3. **All-or-nothing blocks**: a rejected block leaves the engine
//!    exactly as it was
//! 4. **Checked arithmetic**: amounts never wrap or saturate
//!
//! ## Example
//!
//! ```
//! use cakechain_core::{Block, Chain, Keypair, Transaction, CHAIN_ID};
//!
//! let alice = Keypair::from_seed(&[1; 32]);
//! let bob = Keypair::from_seed(&[2; 32]);
//! let mut chain = Chain::genesis(&[(alice.address(), 100)]);
//!
//! // A block producer applies the transactions to a copy of the state to
//! // learn the root it must claim.
//! let tx = Transaction::signed(&alice, bob.address(), 40, 0, CHAIN_ID);
//! let mut next = chain.state().clone();
//! tx.apply(&mut next, CHAIN_ID).unwrap();
//!
//! let block = Block::new(chain.tip_hash(), 1, vec![tx], next.state_root());
//! chain.submit_block(&block).unwrap();
//!
//! assert_eq!(chain.balance_of(&bob.address()), 40);
//! assert_eq!(chain.nonce_of(&alice.address()), 1);
//! ```

mod block;
mod canonical;
mod chain;
mod crypto;
mod error;
mod state;
mod transaction;
mod types;

pub use block::Block;
pub use canonical::{
    block_len, canonical_block, canonical_tx, decode_block, decode_tx, tx_signing_bytes,
    BLOCK_DOMAIN, STATE_DOMAIN, TX_CANONICAL_LEN, TX_DOMAIN, TX_SIGNING_LEN,
};
pub use chain::Chain;
pub use crypto::{sha256, verify_signature, Keypair};
pub use error::{BlockError, CodecError, TxError};
pub use state::State;
pub use transaction::Transaction;
pub use types::{Address, Amount, BlockHeight, ChainId, Hash32, Nonce, Signature};

/// The chain identifier mixed into every transaction signature.
pub const CHAIN_ID: ChainId = 1;
