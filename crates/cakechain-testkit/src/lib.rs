//! # Cakechain Testkit
//!
//! Testing utilities for the Cakechain core.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: deterministic keypairs and block-production helpers for
//!   setting up chain scenarios
//! - **Generators**: proptest strategies for property-based testing
//! - **Vectors**: literal known-answer state roots and block hashes that
//!   every implementation must reproduce
//!
//! ## Fixtures
//!
//! ```rust
//! use cakechain_core::Chain;
//! use cakechain_testkit::fixtures::{produce_block, TestFixture};
//!
//! let alice = TestFixture::with_seed([0xaa; 32]);
//! let bob = TestFixture::with_seed([0xbb; 32]);
//!
//! let mut chain = Chain::genesis(&[(alice.address(), 100)]);
//! let block = produce_block(&chain, vec![alice.transfer(bob.address(), 40, 0)]).unwrap();
//! chain.submit_block(&block).unwrap();
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cakechain_testkit::generators::{transaction_from_params, TransferParams};
//!
//! proptest! {
//!     #[test]
//!     fn canonical_bytes_roundtrip(params: TransferParams) {
//!         let tx = transaction_from_params(&params);
//!         prop_assert_eq!(tx.clone(), Transaction::from_bytes(&tx.to_bytes()).unwrap());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, produce_block, TestFixture};
pub use generators::{transaction_from_params, TransferParams};
pub use vectors::{block_hash_vectors, state_root_vectors, BlockHashVector, StateRootVector};
