// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::{Address, B256, hex};
use k256::ecdsa::SigningKey;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::personal_sign::{EVM_SIGNATURE_LEN, address_from_verifying_key};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Offset added to the recovery id so on-chain `ecrecover` callers using the
/// 27/28 convention accept the signature
const RECOVERY_ID_OFFSET: u8 = 27;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// secp256k1 private key used to produce EVM-compatible signatures
#[derive(Clone)]
pub struct EvmSigningKey {
    signing_key: SigningKey,
    address: Address,
}

impl EvmSigningKey {
    pub fn from_hex(value: &str) -> Result<Self, InvalidSigningKeyError> {
        let digits = value.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);

        let mut key_bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut key_bytes)
            .map_err(|_| InvalidSigningKeyError::Malformed)?;

        let signing_key =
            SigningKey::from_slice(&key_bytes).map_err(|_| InvalidSigningKeyError::OutOfRange)?;

        Ok(Self::new(signing_key))
    }

    pub fn from_secret(value: &SecretString) -> Result<Self, InvalidSigningKeyError> {
        Self::from_hex(value.expose_secret())
    }

    pub fn new(signing_key: SigningKey) -> Self {
        let address = address_from_verifying_key(signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Deterministic (RFC 6979) signature over a 32-byte digest, returned as
    /// `r || s || v` with `v` in `{27, 28}`
    pub fn sign_digest(&self, digest: &B256) -> Result<[u8; EVM_SIGNATURE_LEN], SigningError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest.as_slice())
            .map_err(|_| SigningError)?;

        let mut result = [0u8; EVM_SIGNATURE_LEN];
        result[..64].copy_from_slice(&signature.to_bytes());
        result[64] = recovery_id.to_byte() + RECOVERY_ID_OFFSET;

        Ok(result)
    }
}

impl std::fmt::Debug for EvmSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmSigningKey")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSigningKeyError {
    #[error("Signing key must be 32 hex-encoded bytes")]
    Malformed,

    #[error("Signing key is not a valid secp256k1 scalar")]
    OutOfRange,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Failed to sign digest")]
pub struct SigningError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
