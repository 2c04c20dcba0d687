//!
//! Transaction PIN hashing for storage at rest.
//!

use anyhow::{anyhow, ensure, Result};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use subtle::ConstantTimeEq;

use crate::security::PinCode;

/// Current version of the encoded PIN hash format.
pub const HASH_VERSION: u8 = 0x01;

/// Size of the salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Size of the hash output in bytes.
pub const HASH_SIZE: usize = 32;

/// Total size of the encoded hash (version + salt + hash).
pub const ENCODED_SIZE: usize = 1 + SALT_SIZE + HASH_SIZE;

// 19 MiB, 2 passes, 1 lane.
const MEMORY_KIB: u32 = 19 * 1024;
const ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

fn argon() -> Result<Argon2<'static>> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, Some(HASH_SIZE))
        .map_err(|e| anyhow!("invalid Argon2 parameters: {e}"))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPinHash {
    pub version: u8,
    pub salt: [u8; SALT_SIZE],
    pub hash: [u8; HASH_SIZE],
}

impl EncodedPinHash {
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(ENCODED_SIZE);
        encoded.push(self.version);
        encoded.extend_from_slice(&self.salt);
        encoded.extend_from_slice(&self.hash);
        encoded
    }

    pub fn decode(encoded: &[u8]) -> Result<Self> {
        ensure!(
            encoded.len() == ENCODED_SIZE,
            "Invalid encoded PIN hash length: expected {}, got {}",
            ENCODED_SIZE,
            encoded.len()
        );
        let version = encoded[0];
        ensure!(
            version == HASH_VERSION,
            "Unsupported PIN hash version: {} (supported: {})",
            version,
            HASH_VERSION
        );

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&encoded[1..1 + SALT_SIZE]);

        let mut hash = [0u8; HASH_SIZE];
        hash.copy_from_slice(&encoded[1 + SALT_SIZE..]);

        Ok(Self {
            version,
            salt,
            hash,
        })
    }
}

/// Hash a transaction PIN using Argon2id with a random salt.
pub fn hash_pin(pin: &PinCode) -> Result<Vec<u8>> {
    ensure!(!pin.is_empty(), "refusing to hash an empty PIN");
    let salt = generate_salt();
    let hash = argon2id_hash(pin.expose(), &salt)?;

    Ok(EncodedPinHash {
        version: HASH_VERSION,
        salt,
        hash,
    }
    .encode())
}

/// Verify a transaction PIN against an encoded hash in constant time.
pub fn verify_pin(pin: &PinCode, encoded_hash: &[u8]) -> Result<bool> {
    let decoded = EncodedPinHash::decode(encoded_hash)?;
    let computed = argon2id_hash(pin.expose(), &decoded.salt)?;
    Ok(computed.ct_eq(&decoded.hash).into())
}

fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    rand::rng().fill_bytes(&mut salt);
    salt
}

fn argon2id_hash(pin: &str, salt: &[u8; SALT_SIZE]) -> Result<[u8; HASH_SIZE]> {
    let mut output = [0u8; HASH_SIZE];
    argon()?
        .hash_password_into(pin.as_bytes(), salt, &mut output)
        .map_err(|e| anyhow!("Argon2id hashing failed: {e}"))?;
    Ok(output)
}
