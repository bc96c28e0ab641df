// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::{Address, B256, hex, keccak256};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const EVM_SIGNATURE_LEN: usize = 65;

const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// EIP-191 (version `0x45`) hash of a message:
/// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`,
/// where the length is written as a decimal ASCII string.
pub fn hash_personal_message(message: &[u8]) -> B256 {
    let length = message.len().to_string();

    let mut buf =
        Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + length.len() + message.len());
    buf.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
    buf.extend_from_slice(length.as_bytes());
    buf.extend_from_slice(message);

    keccak256(&buf)
}

/// Decodes a hex signature, with or without the `0x` prefix
pub fn decode_signature_hex(value: &str) -> Result<[u8; EVM_SIGNATURE_LEN], InvalidSignatureError> {
    let value = value.trim();
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    if digits.len() != EVM_SIGNATURE_LEN * 2 {
        return Err(InvalidSignatureError::InvalidLength {
            actual: digits.len() / 2,
        });
    }

    let mut signature = [0u8; EVM_SIGNATURE_LEN];
    hex::decode_to_slice(digits, &mut signature)
        .map_err(|_| InvalidSignatureError::MalformedHex)?;

    Ok(signature)
}

/// `0x`-prefixed lowercase hex, as wallets return signatures
pub fn encode_signature_hex(signature: &[u8; EVM_SIGNATURE_LEN]) -> String {
    hex::encode_prefixed(signature)
}

/// Recovers the address that produced a 65-byte `r || s || v` signature
/// over the given prehashed message.
///
/// Both `v` conventions are accepted: `{0, 1}` and `{27, 28}`.
pub fn recover_address(
    message_hash: &B256,
    signature: &[u8],
) -> Result<Address, InvalidSignatureError> {
    if signature.len() != EVM_SIGNATURE_LEN {
        return Err(InvalidSignatureError::InvalidLength {
            actual: signature.len(),
        });
    }

    let recovery_id = parse_recovery_id(signature[64])?;

    let signature = Signature::from_slice(&signature[..64])
        .map_err(|_| InvalidSignatureError::MalformedSignature)?;

    // Verification rejects high-S values, fold them into the lower half first
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(normalized) => (
            normalized,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (signature, recovery_id),
    };

    let verifying_key =
        VerifyingKey::recover_from_prehash(message_hash.as_slice(), &signature, recovery_id)
            .map_err(|_| InvalidSignatureError::RecoveryFailed)?;

    Ok(address_from_verifying_key(&verifying_key))
}

/// Address is the last 20 bytes of `keccak256(uncompressed_pubkey[1..])`
pub(crate) fn address_from_verifying_key(verifying_key: &VerifyingKey) -> Address {
    let encoded_point = verifying_key.to_encoded_point(false);
    let hash = keccak256(&encoded_point.as_bytes()[1..]);

    Address::from_slice(&hash[12..])
}

fn parse_recovery_id(v: u8) -> Result<RecoveryId, InvalidSignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(InvalidSignatureError::InvalidRecoveryId { v }),
    };

    RecoveryId::from_byte(id).ok_or(InvalidSignatureError::InvalidRecoveryId { v })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSignatureError {
    #[error("Invalid signature length: expected {EVM_SIGNATURE_LEN} bytes, got {actual}")]
    InvalidLength { actual: usize },

    #[error("Signature is not valid hex")]
    MalformedHex,

    #[error("Invalid signature recovery id: {v}")]
    InvalidRecoveryId { v: u8 },

    #[error("Malformed signature")]
    MalformedSignature,

    #[error("Signature does not recover to a valid public key")]
    RecoveryFailed,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
