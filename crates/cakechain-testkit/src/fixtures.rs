//! Test fixtures and helpers.
//!
//! Common setup code for chain scenarios.

use cakechain_core::{
    Address, Amount, Block, BlockError, Chain, Keypair, Nonce, Transaction, CHAIN_ID,
};

/// A test identity with a keypair.
pub struct TestFixture {
    pub keypair: Keypair,
}

impl TestFixture {
    /// Create a fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
        }
    }

    /// The fixture's address.
    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    /// Sign a transfer from this fixture under the default chain id.
    pub fn transfer(&self, to: Address, amount: Amount, nonce: Nonce) -> Transaction {
        Transaction::signed(&self.keypair, to, amount, nonce, CHAIN_ID)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple fixtures with distinct deterministic keys.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0x5a;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// Produce the next block over `chain` the way an honest producer would:
/// apply `txs` in order to a copy of the current state and claim the
/// resulting root. Fails with the first invalid transaction.
pub fn produce_block(chain: &Chain, txs: Vec<Transaction>) -> Result<Block, BlockError> {
    let mut state = chain.state().clone();
    for (index, tx) in txs.iter().enumerate() {
        tx.apply(&mut state, chain.chain_id())
            .map_err(|cause| BlockError::TxInvalid { index, cause })?;
    }
    Ok(Block::new(
        chain.tip_hash(),
        chain.tip_height() + 1,
        txs,
        state.state_root(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_transfer_verifies() {
        let alice = TestFixture::with_seed([0x01; 32]);
        let bob = TestFixture::with_seed([0x02; 32]);

        let tx = alice.transfer(bob.address(), 10, 0);
        assert!(tx.verify_signature(CHAIN_ID).is_ok());
        assert_eq!(tx.from, alice.address());
    }

    #[test]
    fn test_produce_block_is_accepted() {
        let alice = TestFixture::with_seed([0x01; 32]);
        let bob = TestFixture::with_seed([0x02; 32]);
        let mut chain = Chain::genesis(&[(alice.address(), 100)]);

        let block = produce_block(&chain, vec![alice.transfer(bob.address(), 30, 0)]).unwrap();
        chain.submit_block(&block).unwrap();

        assert_eq!(chain.balance_of(&bob.address()), 30);
    }

    #[test]
    fn test_produce_block_reports_first_bad_tx() {
        let alice = TestFixture::with_seed([0x01; 32]);
        let bob = TestFixture::with_seed([0x02; 32]);
        let chain = Chain::genesis(&[(alice.address(), 100)]);

        let result = produce_block(
            &chain,
            vec![
                alice.transfer(bob.address(), 30, 0),
                alice.transfer(bob.address(), 30, 5), // wrong nonce
            ],
        );
        assert!(matches!(
            result,
            Err(BlockError::TxInvalid { index: 1, .. })
        ));
    }

    #[test]
    fn test_multi_party_keys_distinct() {
        let parties = multi_party_fixtures(3);
        assert_ne!(parties[0].address(), parties[1].address());
        assert_ne!(parties[1].address(), parties[2].address());
        assert_ne!(parties[0].address(), parties[2].address());
    }
}
