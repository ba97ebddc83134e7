//! Proptest generators for property-based testing.

use proptest::prelude::*;

use cakechain_core::{Address, Amount, Hash32, Keypair, Nonce, Signature, Transaction, CHAIN_ID};

/// Generate a random address (raw bytes, not necessarily a curve point).
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 32]>().prop_map(Address::from_bytes)
}

/// Generate a random 32-byte hash.
pub fn hash32() -> impl Strategy<Value = Hash32> {
    any::<[u8; 32]>().prop_map(Hash32::from_bytes)
}

/// Generate a random (almost surely invalid) signature.
pub fn signature() -> impl Strategy<Value = Signature> {
    prop::collection::vec(any::<u8>(), 64).prop_map(|v| {
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&v);
        Signature::from_bytes(bytes)
    })
}

/// Generate a keypair from an arbitrary seed.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a non-zero transfer amount.
pub fn amount() -> impl Strategy<Value = Amount> {
    1u64..=u64::MAX
}

/// Parameters for generating a signed transfer.
#[derive(Debug, Clone)]
pub struct TransferParams {
    pub keypair: Keypair,
    pub to: Address,
    pub amount: Amount,
    pub nonce: Nonce,
}

impl Arbitrary for TransferParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<[u8; 32]>(), address(), amount(), any::<Nonce>())
            .prop_map(|(seed, to, amount, nonce)| TransferParams {
                keypair: Keypair::from_seed(&seed),
                to,
                amount,
                nonce,
            })
            .boxed()
    }
}

/// Build a signed transaction from parameters.
pub fn transaction_from_params(params: &TransferParams) -> Transaction {
    Transaction::signed(
        &params.keypair,
        params.to,
        params.amount,
        params.nonce,
        CHAIN_ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cakechain_core::{Block, State, TX_CANONICAL_LEN, TX_SIGNING_LEN};

    proptest! {
        #[test]
        fn tx_canonical_bytes_roundtrip(params: TransferParams) {
            let tx = transaction_from_params(&params);
            let decoded = Transaction::from_bytes(&tx.to_bytes()).unwrap();
            prop_assert_eq!(tx, decoded);
        }

        #[test]
        fn tx_byte_lengths_fixed(params: TransferParams) {
            let tx = transaction_from_params(&params);
            prop_assert_eq!(tx.to_bytes().len(), TX_CANONICAL_LEN);
            prop_assert_eq!(tx.signing_bytes(CHAIN_ID).len(), TX_SIGNING_LEN);
        }

        #[test]
        fn tx_signature_always_verifies(params: TransferParams) {
            let tx = transaction_from_params(&params);
            prop_assert!(tx.verify_signature(CHAIN_ID).is_ok());
        }

        #[test]
        fn block_canonical_bytes_roundtrip(
            parent in hash32(),
            height in any::<u64>(),
            params in prop::collection::vec(any::<TransferParams>(), 0..4),
            root in hash32(),
        ) {
            let txs: Vec<Transaction> = params.iter().map(transaction_from_params).collect();
            let block = Block::new(parent, height, txs, root);
            let decoded = Block::from_bytes(&block.to_bytes()).unwrap();
            prop_assert_eq!(block.hash(), decoded.hash());
            prop_assert_eq!(block, decoded);
        }

        #[test]
        fn state_root_independent_of_insertion_order(
            mut entries in prop::collection::vec(
                (any::<[u8; 32]>(), any::<u64>(), any::<u64>()),
                0..8,
            ),
        ) {
            let build = |entries: &[([u8; 32], u64, u64)]| {
                let mut state = State::new();
                for (addr, balance, nonce) in entries {
                    state.set_balance(Address::from_bytes(*addr), *balance);
                    state.set_nonce(Address::from_bytes(*addr), *nonce);
                }
                state.state_root()
            };

            let forward = build(&entries);
            entries.reverse();
            let backward = build(&entries);
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn state_root_ignores_zero_writes(
            addr in any::<[u8; 32]>(),
            ghost in any::<[u8; 32]>(),
            balance in 1u64..,
        ) {
            prop_assume!(addr != ghost);

            let mut plain = State::new();
            plain.set_balance(Address::from_bytes(addr), balance);

            let mut noisy = State::new();
            noisy.set_balance(Address::from_bytes(addr), balance);
            noisy.set_balance(Address::from_bytes(ghost), 0);
            noisy.set_nonce(Address::from_bytes(ghost), 0);

            prop_assert_eq!(plain.state_root(), noisy.state_root());
        }

        #[test]
        fn tampered_canonical_bytes_fail_verification(
            params: TransferParams,
            flip_bit in 0usize..(TX_CANONICAL_LEN * 8),
        ) {
            let tx = transaction_from_params(&params);
            let mut bytes = tx.to_bytes();
            bytes[flip_bit / 8] ^= 1 << (flip_bit % 8);

            let decoded = Transaction::from_bytes(&bytes).unwrap();
            // Any single-bit flip either changes a signed field or breaks
            // the signature itself; verification must fail.
            prop_assert!(decoded.verify_signature(CHAIN_ID).is_err());
        }
    }
}
