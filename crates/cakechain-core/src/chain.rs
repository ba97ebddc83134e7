//! The chain engine: tip tracking, genesis, block acceptance.
//!
//! The engine owns the tip and the current state and is the single entry
//! point for mutation. A candidate block is evaluated against a working
//! copy of the state; only on full success are the tip and state swapped,
//! so a rejected block leaves the engine exactly as it was.
//!
//! The engine is a synchronous state machine with no interior locking;
//! embedders that share it across threads serialize access themselves.

use crate::block::Block;
use crate::error::BlockError;
use crate::state::State;
use crate::types::{Address, Amount, BlockHeight, ChainId, Hash32, Nonce};
use crate::CHAIN_ID;

/// The linear chain: one tip, one state.
#[derive(Clone, Debug)]
pub struct Chain {
    chain_id: ChainId,
    tip_hash: Hash32,
    tip_height: BlockHeight,
    state: State,
}

impl Chain {
    /// Construct a chain from its genesis allocation.
    ///
    /// The genesis block is fixed by the protocol: parent is the zero
    /// hash, height 0, no transactions, root of the initial state. The
    /// allocation itself is a network constant every node must agree on;
    /// duplicate addresses take the last entry, zero amounts are no-ops.
    pub fn genesis(allocation: &[(Address, Amount)]) -> Self {
        let mut state = State::new();
        for (address, amount) in allocation {
            state.set_balance(*address, *amount);
        }

        let genesis_block = Block::new(Hash32::ZERO, 0, Vec::new(), state.state_root());
        let tip_hash = genesis_block.hash();

        tracing::debug!("genesis block {} initialized", tip_hash);

        Self {
            chain_id: CHAIN_ID,
            tip_hash,
            tip_height: 0,
            state,
        }
    }

    /// The chain id transactions must be signed against.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Hash of the most recently accepted block.
    pub fn tip_hash(&self) -> Hash32 {
        self.tip_hash
    }

    /// Height of the most recently accepted block.
    pub fn tip_height(&self) -> BlockHeight {
        self.tip_height
    }

    /// Tip hash and height as a pair.
    pub fn tip(&self) -> (Hash32, BlockHeight) {
        (self.tip_hash, self.tip_height)
    }

    /// Root of the current state.
    pub fn state_root(&self) -> Hash32 {
        self.state.state_root()
    }

    /// Balance of `address` in the current state, 0 if absent.
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.state.get_balance(address)
    }

    /// Nonce of `address` in the current state, 0 if absent.
    pub fn nonce_of(&self, address: &Address) -> Nonce {
        self.state.get_nonce(address)
    }

    /// The current state. Block producers clone this to compute the root
    /// they claim.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Validate `block` against the tip and, if it is a valid extension,
    /// advance the tip. Returns the accepted block's hash.
    ///
    /// Checks, in order: parent hash, height, every transaction in listed
    /// order, claimed state root. Rejection has no side effect; forks are
    /// never materialized.
    pub fn submit_block(&mut self, block: &Block) -> Result<Hash32, BlockError> {
        match self.try_extend(block) {
            Ok(hash) => {
                tracing::debug!(
                    "accepted block {} at height {} ({} txs)",
                    hash,
                    block.height,
                    block.txs.len()
                );
                Ok(hash)
            }
            Err(err) => {
                tracing::warn!("rejected block at height {}: {}", block.height, err);
                Err(err)
            }
        }
    }

    fn try_extend(&mut self, block: &Block) -> Result<Hash32, BlockError> {
        if block.parent_hash != self.tip_hash {
            return Err(BlockError::BadParent {
                expected: self.tip_hash,
                got: block.parent_hash,
            });
        }

        let expected_height = self.tip_height.checked_add(1);
        if Some(block.height) != expected_height {
            return Err(BlockError::BadHeight {
                expected: expected_height.unwrap_or(BlockHeight::MAX),
                got: block.height,
            });
        }

        let mut working = self.state.clone();
        for (index, tx) in block.txs.iter().enumerate() {
            tx.apply(&mut working, self.chain_id)
                .map_err(|cause| BlockError::TxInvalid { index, cause })?;
        }

        let computed = working.state_root();
        if computed != block.state_root {
            return Err(BlockError::BadStateRoot {
                expected: block.state_root,
                computed,
            });
        }

        let hash = block.hash();
        self.state = working;
        self.tip_hash = hash;
        self.tip_height = block.height;
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use crate::error::TxError;
    use crate::transaction::Transaction;

    fn keypair(byte: u8) -> Keypair {
        Keypair::from_seed(&[byte; 32])
    }

    /// Build the next block over `chain` by actually applying `txs`.
    fn next_block(chain: &Chain, txs: Vec<Transaction>) -> Block {
        let mut state = chain.state().clone();
        for tx in &txs {
            tx.apply(&mut state, chain.chain_id()).unwrap();
        }
        Block::new(
            chain.tip_hash(),
            chain.tip_height() + 1,
            txs,
            state.state_root(),
        )
    }

    #[test]
    fn test_genesis_constants() {
        let chain = Chain::genesis(&[]);
        assert_eq!(chain.tip_height(), 0);
        assert_eq!(chain.chain_id(), CHAIN_ID);

        // Tip is the hash of the protocol-fixed genesis block.
        let genesis_block = Block::new(Hash32::ZERO, 0, Vec::new(), chain.state_root());
        assert_eq!(chain.tip_hash(), genesis_block.hash());
    }

    #[test]
    fn test_genesis_allocation_applied() {
        let alice = keypair(0x01);
        let chain = Chain::genesis(&[(alice.address(), 100)]);
        assert_eq!(chain.balance_of(&alice.address()), 100);
        assert_eq!(chain.nonce_of(&alice.address()), 0);
    }

    #[test]
    fn test_genesis_duplicate_address_last_wins() {
        let alice = keypair(0x01);
        let chain = Chain::genesis(&[(alice.address(), 100), (alice.address(), 25)]);
        assert_eq!(chain.balance_of(&alice.address()), 25);
    }

    #[test]
    fn test_accepts_valid_block() {
        let alice = keypair(0x01);
        let bob = keypair(0x02);
        let mut chain = Chain::genesis(&[(alice.address(), 100)]);

        let tx = Transaction::signed(&alice, bob.address(), 40, 0, CHAIN_ID);
        let block = next_block(&chain, vec![tx]);
        let hash = chain.submit_block(&block).unwrap();

        assert_eq!(chain.tip(), (hash, 1));
        assert_eq!(hash, block.hash());
        assert_eq!(chain.balance_of(&alice.address()), 60);
        assert_eq!(chain.balance_of(&bob.address()), 40);
        assert_eq!(chain.nonce_of(&alice.address()), 1);
    }

    #[test]
    fn test_rejects_bad_parent() {
        let mut chain = Chain::genesis(&[]);
        let block = Block::new(Hash32::from_bytes([0xee; 32]), 1, vec![], chain.state_root());

        let err = chain.submit_block(&block).unwrap_err();
        assert_eq!(
            err,
            BlockError::BadParent {
                expected: chain.tip_hash(),
                got: Hash32::from_bytes([0xee; 32]),
            }
        );
        assert_eq!(chain.tip_height(), 0);
    }

    #[test]
    fn test_rejects_bad_height() {
        let mut chain = Chain::genesis(&[]);
        let block = Block::new(chain.tip_hash(), 5, vec![], chain.state_root());

        let err = chain.submit_block(&block).unwrap_err();
        assert_eq!(err, BlockError::BadHeight { expected: 1, got: 5 });
    }

    #[test]
    fn test_rejects_replayed_height() {
        let mut chain = Chain::genesis(&[]);
        let block = next_block(&chain, vec![]);
        chain.submit_block(&block).unwrap();

        // Same height again: parent check fires first (the tip moved).
        let err = chain.submit_block(&block).unwrap_err();
        assert!(matches!(err, BlockError::BadParent { .. }));
    }

    #[test]
    fn test_rejects_invalid_tx_with_index() {
        let alice = keypair(0x01);
        let bob = keypair(0x02);
        let mut chain = Chain::genesis(&[(alice.address(), 100)]);

        let good = Transaction::signed(&alice, bob.address(), 10, 0, CHAIN_ID);
        let stale = Transaction::signed(&alice, bob.address(), 10, 0, CHAIN_ID);
        let block = Block::new(
            chain.tip_hash(),
            1,
            vec![good, stale],
            chain.state_root(),
        );

        let err = chain.submit_block(&block).unwrap_err();
        assert_eq!(
            err,
            BlockError::TxInvalid {
                index: 1,
                cause: TxError::WrongNonce {
                    expected: 1,
                    got: 0
                },
            }
        );
        // No partial application.
        assert_eq!(chain.balance_of(&alice.address()), 100);
        assert_eq!(chain.nonce_of(&alice.address()), 0);
        assert_eq!(chain.tip_height(), 0);
    }

    #[test]
    fn test_rejects_bad_state_root() {
        let mut chain = Chain::genesis(&[]);
        let claimed = Hash32::from_bytes([0xdd; 32]);
        let block = Block::new(chain.tip_hash(), 1, vec![], claimed);

        let err = chain.submit_block(&block).unwrap_err();
        assert_eq!(
            err,
            BlockError::BadStateRoot {
                expected: claimed,
                computed: chain.state_root(),
            }
        );
    }

    #[test]
    fn test_empty_block_advances_tip() {
        let mut chain = Chain::genesis(&[]);
        let root_before = chain.state_root();

        let block = next_block(&chain, vec![]);
        chain.submit_block(&block).unwrap();

        assert_eq!(chain.tip_height(), 1);
        assert_eq!(chain.state_root(), root_before);
    }

    #[test]
    fn test_fork_never_materializes() {
        let alice = keypair(0x01);
        let bob = keypair(0x02);
        let mut chain = Chain::genesis(&[(alice.address(), 100)]);
        let genesis_hash = chain.tip_hash();

        let tx = Transaction::signed(&alice, bob.address(), 40, 0, CHAIN_ID);
        let block = next_block(&chain, vec![tx]);
        chain.submit_block(&block).unwrap();

        // A competing block at height 1 extends genesis, not the tip.
        let rival_tx = Transaction::signed(&alice, bob.address(), 1, 0, CHAIN_ID);
        let rival = Block::new(genesis_hash, 1, vec![rival_tx], chain.state_root());

        let err = chain.submit_block(&rival).unwrap_err();
        assert!(matches!(err, BlockError::BadParent { .. }));
        assert_eq!(chain.tip(), (block.hash(), 1));
        assert_eq!(chain.balance_of(&bob.address()), 40);
    }

    #[test]
    fn test_chain_of_blocks() {
        let alice = keypair(0x01);
        let bob = keypair(0x02);
        let mut chain = Chain::genesis(&[(alice.address(), 100)]);

        for nonce in 0..3 {
            let tx = Transaction::signed(&alice, bob.address(), 10, nonce, CHAIN_ID);
            let block = next_block(&chain, vec![tx]);
            chain.submit_block(&block).unwrap();
        }

        assert_eq!(chain.tip_height(), 3);
        assert_eq!(chain.balance_of(&alice.address()), 70);
        assert_eq!(chain.balance_of(&bob.address()), 30);
        assert_eq!(chain.nonce_of(&alice.address()), 3);
    }
}
