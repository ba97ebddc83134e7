//! The ledger state: balances and nonces with a deterministic root.
//!
//! State is a total function from address to `(balance, nonce)` with
//! default zero. The maps are `BTreeMap` so iteration is already in the
//! lexicographic address order the root serialization requires.
//!
//! Zero is never distinguishable from absent: writes of zero remove the
//! entry, and the root computation additionally skips any address whose
//! balance and nonce are both zero. Either measure alone would make roots
//! canonical; both together keep the maps minimal as well.

use std::collections::{BTreeMap, BTreeSet};

use crate::canonical::STATE_DOMAIN;
use crate::crypto::sha256;
use crate::types::{Address, Amount, Hash32, Nonce};

/// In-memory account state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    balances: BTreeMap<Address, Amount>,
    nonces: BTreeMap<Address, Nonce>,
}

impl State {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `address`, 0 if absent.
    pub fn get_balance(&self, address: &Address) -> Amount {
        self.balances.get(address).copied().unwrap_or(0)
    }

    /// Nonce of `address`, 0 if absent.
    pub fn get_nonce(&self, address: &Address) -> Nonce {
        self.nonces.get(address).copied().unwrap_or(0)
    }

    /// Overwrite the balance of `address`. Writing 0 removes the entry.
    pub fn set_balance(&mut self, address: Address, value: Amount) {
        if value == 0 {
            self.balances.remove(&address);
        } else {
            self.balances.insert(address, value);
        }
    }

    /// Overwrite the nonce of `address`. Writing 0 removes the entry.
    pub fn set_nonce(&mut self, address: Address, value: Nonce) {
        if value == 0 {
            self.nonces.remove(&address);
        } else {
            self.nonces.insert(address, value);
        }
    }

    /// Iterate non-zero balances in address order.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    /// Iterate non-zero nonces in address order.
    pub fn nonces(&self) -> impl Iterator<Item = (&Address, &Nonce)> {
        self.nonces.iter()
    }

    /// Serialize the state for root hashing:
    /// `"STATEv1" || count || (address || balance || nonce)*`
    /// over every address with a non-zero balance or nonce, ascending by
    /// address bytes.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut live: BTreeSet<&Address> = BTreeSet::new();
        for (address, balance) in &self.balances {
            if *balance != 0 {
                live.insert(address);
            }
        }
        for (address, nonce) in &self.nonces {
            if *nonce != 0 {
                live.insert(address);
            }
        }

        let mut out = Vec::with_capacity(STATE_DOMAIN.len() + 8 + live.len() * 48);
        out.extend_from_slice(STATE_DOMAIN);
        out.extend_from_slice(&(live.len() as u64).to_le_bytes());
        for address in live {
            out.extend_from_slice(address.as_bytes());
            out.extend_from_slice(&self.get_balance(address).to_le_bytes());
            out.extend_from_slice(&self.get_nonce(address).to_le_bytes());
        }
        out
    }

    /// The deterministic root of the entire state.
    pub fn state_root(&self) -> Hash32 {
        sha256(&self.canonical_bytes())
    }
}
