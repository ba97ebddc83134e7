//! Canonical byte encodings for hashing and signing.
//!
//! Every integer is exactly 8 bytes little-endian, every byte array is
//! emitted verbatim, and there are no delimiters, varints, or text. Three
//! ASCII domain tags keep the hash inputs of different structures disjoint.
//!
//! **CRITICAL**: these layouts are frozen. Changing any field order, width,
//! or tag changes every hash and signature on the network.

use crate::block::Block;
use crate::error::CodecError;
use crate::transaction::Transaction;
use crate::types::{Address, Amount, ChainId, Hash32, Nonce, Signature};

/// Domain tag for transaction signing bytes.
pub const TX_DOMAIN: &[u8] = b"TXv1";

/// Domain tag for state-root input bytes.
pub const STATE_DOMAIN: &[u8] = b"STATEv1";

/// Domain tag for canonical block bytes.
pub const BLOCK_DOMAIN: &[u8] = b"BLOCKv1";

/// Length of transaction signing bytes:
/// `"TXv1" || chain_id || from || to || amount || nonce`.
pub const TX_SIGNING_LEN: usize = TX_DOMAIN.len() + 8 + 32 + 32 + 8 + 8;

/// Length of a canonical transaction:
/// `from || to || amount || nonce || signature`. No tag.
pub const TX_CANONICAL_LEN: usize = 32 + 32 + 8 + 8 + 64;

/// Length of canonical block bytes for `n` transactions:
/// `"BLOCKv1" || parent || height || tx_count || n txs || state_root`.
pub const fn block_len(tx_count: usize) -> usize {
    BLOCK_DOMAIN.len() + 32 + 8 + 8 + tx_count * TX_CANONICAL_LEN + 32
}

fn take<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8], CodecError> {
    if input.len() < n {
        return Err(CodecError::UnexpectedEof);
    }
    let (head, tail) = input.split_at(n);
    *input = tail;
    Ok(head)
}

fn read_u64_le(input: &mut &[u8]) -> Result<u64, CodecError> {
    let b = take(input, 8)?;
    Ok(u64::from_le_bytes([
        b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
    ]))
}

fn read_32(input: &mut &[u8]) -> Result<[u8; 32], CodecError> {
    let b = take(input, 32)?;
    let mut out = [0u8; 32];
    out.copy_from_slice(b);
    Ok(out)
}

fn read_64(input: &mut &[u8]) -> Result<[u8; 64], CodecError> {
    let b = take(input, 64)?;
    let mut out = [0u8; 64];
    out.copy_from_slice(b);
    Ok(out)
}

/// Build the message an external signer signs:
/// `"TXv1" || chain_id || from || to || amount || nonce` (92 bytes).
///
/// The signature field is excluded; the chain id binds the signature to one
/// network.
pub fn tx_signing_bytes(
    from: &Address,
    to: &Address,
    amount: Amount,
    nonce: Nonce,
    chain_id: ChainId,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(TX_SIGNING_LEN);
    out.extend_from_slice(TX_DOMAIN);
    out.extend_from_slice(&chain_id.to_le_bytes());
    out.extend_from_slice(from.as_bytes());
    out.extend_from_slice(to.as_bytes());
    out.extend_from_slice(&amount.to_le_bytes());
    out.extend_from_slice(&nonce.to_le_bytes());
    out
}

/// Encode a transaction to its canonical 144 bytes, signature included.
///
/// This is the form embedded in block bytes; it carries no domain tag of
/// its own because it is only ever hashed inside a tagged block.
pub fn canonical_tx(tx: &Transaction) -> Vec<u8> {
    let mut out = Vec::with_capacity(TX_CANONICAL_LEN);
    write_tx(&mut out, tx);
    out
}

fn write_tx(out: &mut Vec<u8>, tx: &Transaction) {
    out.extend_from_slice(tx.from.as_bytes());
    out.extend_from_slice(tx.to.as_bytes());
    out.extend_from_slice(&tx.amount.to_le_bytes());
    out.extend_from_slice(&tx.nonce.to_le_bytes());
    out.extend_from_slice(tx.signature.as_bytes());
}

fn read_tx(input: &mut &[u8]) -> Result<Transaction, CodecError> {
    let from = Address::from_bytes(read_32(input)?);
    let to = Address::from_bytes(read_32(input)?);
    let amount = read_u64_le(input)?;
    let nonce = read_u64_le(input)?;
    let signature = Signature::from_bytes(read_64(input)?);
    Ok(Transaction {
        from,
        to,
        amount,
        nonce,
        signature,
    })
}

/// Decode a transaction from exactly 144 canonical bytes.
///
/// Purely structural: no signature or state checks happen here.
pub fn decode_tx(bytes: &[u8]) -> Result<Transaction, CodecError> {
    let mut input = bytes;
    let tx = read_tx(&mut input)?;
    if !input.is_empty() {
        return Err(CodecError::TrailingBytes);
    }
    Ok(tx)
}

/// Encode a block to its canonical bytes:
/// `"BLOCKv1" || parent || height || tx_count || txs || state_root`.
///
/// The state root is the root *claimed* by the block, emitted verbatim.
pub fn canonical_block(block: &Block) -> Vec<u8> {
    let mut out = Vec::with_capacity(block_len(block.txs.len()));
    out.extend_from_slice(BLOCK_DOMAIN);
    out.extend_from_slice(block.parent_hash.as_bytes());
    out.extend_from_slice(&block.height.to_le_bytes());
    out.extend_from_slice(&(block.txs.len() as u64).to_le_bytes());
    for tx in &block.txs {
        write_tx(&mut out, tx);
    }
    out.extend_from_slice(block.state_root.as_bytes());
    out
}

/// Decode a block from canonical bytes.
///
/// The declared transaction count must account for the input exactly; the
/// count is validated with checked arithmetic before anything is allocated.
pub fn decode_block(bytes: &[u8]) -> Result<Block, CodecError> {
    let mut input = bytes;

    let tag = take(&mut input, BLOCK_DOMAIN.len())?;
    if tag != BLOCK_DOMAIN {
        return Err(CodecError::BadDomainTag);
    }

    let parent_hash = Hash32::from_bytes(read_32(&mut input)?);
    let height = read_u64_le(&mut input)?;

    let tx_count: usize = read_u64_le(&mut input)?
        .try_into()
        .map_err(|_| CodecError::LengthOverflow)?;
    let expected = tx_count
        .checked_mul(TX_CANONICAL_LEN)
        .and_then(|n| n.checked_add(32))
        .ok_or(CodecError::LengthOverflow)?;
    if input.len() < expected {
        return Err(CodecError::UnexpectedEof);
    }
    if input.len() > expected {
        return Err(CodecError::TrailingBytes);
    }

    let mut txs = Vec::with_capacity(tx_count);
    for _ in 0..tx_count {
        txs.push(read_tx(&mut input)?);
    }
    let state_root = Hash32::from_bytes(read_32(&mut input)?);

    Ok(Block {
        parent_hash,
        height,
        txs,
        state_root,
    })
}
