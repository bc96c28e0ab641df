// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crypto_utils::B256;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const TX_HASH_HEX_LEN: usize = 64;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Accepts `0x` followed by exactly 64 hex digits, surrounding whitespace
/// is ignored
pub fn parse_tx_hash(value: &str) -> Result<B256, InvalidTxHashError> {
    let invalid = || InvalidTxHashError {
        value: value.to_string(),
    };

    let digits = value.trim().strip_prefix("0x").ok_or_else(invalid)?;

    if digits.len() != TX_HASH_HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    digits.parse().map_err(|_| invalid())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid transaction hash: {value}")]
pub struct InvalidTxHashError {
    pub value: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
