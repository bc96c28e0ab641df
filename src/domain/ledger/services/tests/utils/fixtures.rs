// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use alloy_sol_types::SolEvent;
use chrono::{DateTime, TimeZone, Utc};
use crypto_utils::{Address, B256, U256};
use tipmnee_accounts::{ChannelLink, ChannelLinkRepository, Platform, UserID};
use tipmnee_ledger::{ChainLog, channel_id_hash};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub mod abi {
    alloy_sol_types::sol! {
        event Tipped(bytes32 indexed channelIdHash, address indexed from, uint256 amount, string message);
        event Withdrawn(bytes32 indexed channelIdHash, address indexed payoutAddress, uint256 amount);

        struct Claim {
            bytes32 channelIdHash;
            address payoutAddress;
            uint256 expiry;
            bytes32 nonce;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const CHAIN_ID: u64 = 11_155_111;

pub fn escrow_contract() -> Address {
    Address::repeat_byte(0xee)
}

pub fn tipper() -> Address {
    Address::repeat_byte(0x11)
}

pub fn block_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2050, 1, 2, 12, 0, 0).unwrap()
}

pub fn tx_hash(byte: u8) -> B256 {
    B256::repeat_byte(byte)
}

pub fn tx_hash_hex(byte: u8) -> String {
    format!("{:#x}", tx_hash(byte))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn tipped_log(
    emitter: Address,
    platform_channel_id: &str,
    amount: U256,
    message: &str,
    log_index: u64,
) -> ChainLog {
    let event = abi::Tipped {
        channelIdHash: channel_id_hash(platform_channel_id),
        from: tipper(),
        amount,
        message: message.to_string(),
    };

    ChainLog {
        address: emitter,
        topics: vec![
            abi::Tipped::SIGNATURE_HASH,
            event.channelIdHash,
            tipper().into_word(),
        ],
        data: event.encode_data(),
        log_index,
    }
}

pub fn withdrawn_log(
    emitter: Address,
    platform_channel_id: &str,
    payout_address: Address,
    amount: U256,
    log_index: u64,
) -> ChainLog {
    let event = abi::Withdrawn {
        channelIdHash: channel_id_hash(platform_channel_id),
        payoutAddress: payout_address,
        amount,
    };

    ChainLog {
        address: emitter,
        topics: vec![
            abi::Withdrawn::SIGNATURE_HASH,
            event.channelIdHash,
            payout_address.into_word(),
        ],
        data: event.encode_data(),
        log_index,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn link_channel(
    channel_link_repo: &Arc<dyn ChannelLinkRepository>,
    user_id: UserID,
    platform_channel_id: &str,
    verified: bool,
) {
    channel_link_repo
        .create_channel_link(&ChannelLink {
            user_id,
            platform: Platform::YouTube,
            platform_channel_id: platform_channel_id.to_string(),
            verified_at: verified.then(block_time),
        })
        .await
        .unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
