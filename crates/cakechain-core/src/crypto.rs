//! Cryptographic primitives: SHA-256 hashing and Ed25519 verification.
//!
//! The core only ever *verifies* signatures; transactions arrive pre-signed.
//! [`Keypair`] exists for embedders that produce transactions (wallets,
//! block producers, tests) and wraps ed25519-dalek's `SigningKey`.
//!
//! Verification is `verify_strict`: non-canonical scalar encodings and
//! small-order points are rejected. This is a protocol requirement, not a
//! hardening option; a lenient verifier would accept signatures other nodes
//! reject and fork itself off the network.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::types::{Address, Hash32, Signature};

/// Compute the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Hash32(hasher.finalize().into())
}

/// Verify an Ed25519 signature over `message` against `address`.
///
/// Returns `false` for any failure, including address bytes that are not a
/// valid public key.
pub fn verify_signature(address: &Address, message: &[u8], signature: &Signature) -> bool {
    let verifying_key = match VerifyingKey::from_bytes(address.as_bytes()) {
        Ok(key) => key,
        Err(_) => return false,
    };
    let sig = DalekSignature::from_bytes(signature.as_bytes());
    verifying_key.verify_strict(message, &sig).is_ok()
}

/// An Ed25519 keypair for signing transactions.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    /// Create from a 32-byte seed. Deterministic: the same seed always
    /// yields the same keypair.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// The address of this keypair (its public key bytes).
    pub fn address(&self) -> Address {
        Address(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.address())
    }
}
