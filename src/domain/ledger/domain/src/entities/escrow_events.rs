// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use alloy_sol_types::SolEvent;
use crypto_utils::{Address, B256, U256, keccak256};
use thiserror::Error;

use crate::{ChainLog, LedgerEventType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

mod abi {
    alloy_sol_types::sol! {
        event Tipped(bytes32 indexed channelIdHash, address indexed from, uint256 amount, string message);
        event Withdrawn(bytes32 indexed channelIdHash, address indexed payoutAddress, uint256 amount);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Indexed channel topic of escrow events, equals Solidity's
/// `keccak256(abi.encodePacked(channelId))`
pub fn channel_id_hash(platform_channel_id: &str) -> B256 {
    keccak256(platform_channel_id.as_bytes())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum EscrowEventKind {
    Tipped,
    Withdrawn,
}

impl EscrowEventKind {
    /// `topic0` of the event
    pub fn signature_hash(self) -> B256 {
        match self {
            Self::Tipped => abi::Tipped::SIGNATURE_HASH,
            Self::Withdrawn => abi::Withdrawn::SIGNATURE_HASH,
        }
    }

    pub fn ledger_event_type(self) -> LedgerEventType {
        match self {
            Self::Tipped => LedgerEventType::Tip,
            Self::Withdrawn => LedgerEventType::Withdraw,
        }
    }

    /// A log counts only if all three bindings hold: emitting contract,
    /// event signature and channel topic
    pub fn matches(
        self,
        log: &ChainLog,
        escrow_contract: &Address,
        channel_id_hash: &B256,
    ) -> bool {
        log.address == *escrow_contract
            && log.topics.first() == Some(&self.signature_hash())
            && log.topics.get(1) == Some(channel_id_hash)
    }

    /// Decodes the non-indexed part of the event
    pub fn decode_data(self, data: &[u8]) -> Result<EscrowEventData, DecodeEscrowEventError> {
        let decode_error = |e: alloy_sol_types::Error| DecodeEscrowEventError {
            event_kind: self,
            reason: e.to_string(),
        };

        match self {
            Self::Tipped => {
                let (amount_raw, message) =
                    abi::Tipped::abi_decode_data(data).map_err(decode_error)?;

                Ok(EscrowEventData {
                    amount_raw,
                    message: normalize_tip_message(message),
                })
            }
            Self::Withdrawn => {
                let (amount_raw,) = abi::Withdrawn::abi_decode_data(data).map_err(decode_error)?;

                Ok(EscrowEventData {
                    amount_raw,
                    message: None,
                })
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowEventData {
    pub amount_raw: U256,
    pub message: Option<String>,
}

fn normalize_tip_message(message: String) -> Option<String> {
    (!message.trim().is_empty()).then_some(message)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed {event_kind} log data: {reason}")]
pub struct DecodeEscrowEventError {
    pub event_kind: EscrowEventKind,
    pub reason: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
