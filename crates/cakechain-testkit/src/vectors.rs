//! Known-answer vectors for cross-implementation verification.
//!
//! These pin the pure-hash surfaces of the protocol: state roots and block
//! hashes over synthetic addresses. They need no key material, so any
//! implementation in any language can check them first, before wiring up
//! Ed25519.

use cakechain_core::{Address, Amount, Hash32, Nonce, State};

/// A state-root vector: entries in, root out.
#[derive(Debug, Clone)]
pub struct StateRootVector {
    pub name: &'static str,
    /// `(address, balance, nonce)` per account, any order.
    pub entries: &'static [(Address, Amount, Nonce)],
    /// Expected root, hex.
    pub expected_root: &'static str,
}

/// A block-hash vector over an empty transaction list.
#[derive(Debug, Clone)]
pub struct BlockHashVector {
    pub name: &'static str,
    pub parent_hash: Hash32,
    pub height: u64,
    pub state_root: &'static str,
    /// Expected block hash, hex.
    pub expected_hash: &'static str,
}

const A: Address = Address::from_bytes([0x11; 32]);
const B: Address = Address::from_bytes([0x22; 32]);
const C: Address = Address::from_bytes([0x33; 32]);

const EMPTY: &[(Address, Amount, Nonce)] = &[];
const SINGLE_ACCOUNT: &[(Address, Amount, Nonce)] = &[(A, 100, 0)];
const PAIR_AFTER_TRANSFER: &[(Address, Amount, Nonce)] = &[(A, 60, 1), (B, 40, 0)];
const MIXED_ZERO_FIELDS: &[(Address, Amount, Nonce)] = &[(A, 1, 2), (B, 3, 0), (C, 0, 5)];
const U64_MAX_FIELDS: &[(Address, Amount, Nonce)] = &[(A, u64::MAX, u64::MAX)];

/// All state-root vectors.
pub fn state_root_vectors() -> Vec<StateRootVector> {
    vec![
        StateRootVector {
            name: "empty",
            entries: EMPTY,
            expected_root: "ad072e6b3fcc449d755ff630090c99260c6125b0d7baaa1f225b29e4e51378a8",
        },
        StateRootVector {
            name: "single_account",
            entries: SINGLE_ACCOUNT,
            expected_root: "cf0b61bb45dbfd909f47a2207c68c7a4152d99682f6e4058922d4c8e7728bae0",
        },
        StateRootVector {
            name: "pair_after_transfer",
            entries: PAIR_AFTER_TRANSFER,
            expected_root: "48156664ea277e4d5ce83ac0a71107c029fd6460aeff634f539dd75218876062",
        },
        StateRootVector {
            // A zero balance with a live nonce stays in the root, a zero
            // nonce with a live balance likewise.
            name: "mixed_zero_fields",
            entries: MIXED_ZERO_FIELDS,
            expected_root: "c4c00339bab716573deac43e82cc38e0554592267bba588167b9361980315d05",
        },
        StateRootVector {
            name: "u64_max_fields",
            entries: U64_MAX_FIELDS,
            expected_root: "d032af5ff77184c62e0f6d09b93253a97cc092f30e0c2260b2941757d84bbaf4",
        },
    ]
}

/// All block-hash vectors.
pub fn block_hash_vectors() -> Vec<BlockHashVector> {
    vec![
        BlockHashVector {
            name: "genesis_empty_allocation",
            parent_hash: Hash32::ZERO,
            height: 0,
            state_root: "ad072e6b3fcc449d755ff630090c99260c6125b0d7baaa1f225b29e4e51378a8",
            expected_hash: "1565dc296d4a9bff604b107e9c70dca2c6b4992e45e1e44d5d3667212f4b4234",
        },
        BlockHashVector {
            name: "empty_block_height_one",
            parent_hash: Hash32::from_bytes([0x11; 32]),
            height: 1,
            state_root: "cf0b61bb45dbfd909f47a2207c68c7a4152d99682f6e4058922d4c8e7728bae0",
            expected_hash: "0efd067a6248ef5b1e6e7559c09603542d91dff011df33e3559fd97212750d62",
        },
    ]
}

/// Build a state from a vector's entries.
pub fn build_state(vector: &StateRootVector) -> State {
    let mut state = State::new();
    for (address, balance, nonce) in vector.entries {
        state.set_balance(*address, *balance);
        state.set_nonce(*address, *nonce);
    }
    state
}
