// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use crypto_utils::{
    Address,
    B256,
    Eip712Domain,
    Eip712Error,
    Eip712Member,
    Eip712Struct,
    Eip712Types,
    U256,
    hash_typed_data,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const CLAIM_TYPE_NAME: &str = "Claim";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Withdrawal authorization checked by the escrow contract. Member order is
/// part of the on-chain type hash:
/// `Claim(bytes32 channelIdHash,address payoutAddress,uint256 expiry,bytes32 nonce)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub channel_id_hash: B256,
    pub payout_address: Address,
    /// Unix seconds
    pub expiry: u64,
    pub nonce: B256,
}

impl Claim {
    pub fn eip712_types() -> Eip712Types {
        Eip712Types::new().with_struct(
            CLAIM_TYPE_NAME,
            vec![
                Eip712Member::new("bytes32", "channelIdHash"),
                Eip712Member::new("address", "payoutAddress"),
                Eip712Member::new("uint256", "expiry"),
                Eip712Member::new("bytes32", "nonce"),
            ],
        )
    }

    pub fn to_eip712_struct(&self) -> Eip712Struct {
        Eip712Struct::new()
            .with("channelIdHash", self.channel_id_hash)
            .with("payoutAddress", self.payout_address)
            .with("expiry", U256::from(self.expiry))
            .with("nonce", self.nonce)
    }

    /// Digest the verifier key signs
    pub fn signing_hash(&self, domain: &Eip712Domain) -> Result<B256, Eip712Error> {
        hash_typed_data(
            domain,
            &Self::eip712_types(),
            CLAIM_TYPE_NAME,
            &self.to_eip712_struct(),
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Signed claim handed to the creator, who submits it to the escrow contract.
/// Not stored: nonce replay is tracked on-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPayload {
    pub channel_id_hash: B256,
    pub payout_address: Address,
    pub expiry: DateTime<Utc>,
    pub nonce: B256,
    /// `0x`-prefixed `r || s || v`, `v` in `{27, 28}`
    pub signature: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
