// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_primitives::{Address, hex};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const EVM_ADDRESS_HEX_LEN: usize = 40;

/// Parses a `0x`-prefixed, 20-byte hex address. Checksum casing is not
/// enforced: addresses are compared and stored in lowercase form.
pub fn parse_evm_address(value: &str) -> Result<Address, InvalidEvmAddressError> {
    let trimmed = value.trim();

    let Some(digits) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    else {
        return Err(InvalidEvmAddressError::new(value));
    };

    if digits.len() != EVM_ADDRESS_HEX_LEN {
        return Err(InvalidEvmAddressError::new(value));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| InvalidEvmAddressError::new(value))?;

    Ok(Address::from(bytes))
}

/// Lowercase `0x`-prefixed representation used for storage and comparison
pub fn to_lowercase_hex(address: &Address) -> String {
    hex::encode_prefixed(address)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid EVM address: '{value}'")]
pub struct InvalidEvmAddressError {
    pub value: String,
}

impl InvalidEvmAddressError {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
