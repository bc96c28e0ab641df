// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use crypto_utils::{B256, U256};
use tipmnee_accounts::{Platform, UserID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Escrow channel ids are channel ids of this platform
pub const ESCROW_CHANNEL_PLATFORM: Platform = Platform::YouTube;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
pub enum LedgerEventType {
    #[strum(serialize = "TIP")]
    Tip,
    #[strum(serialize = "WITHDRAW")]
    Withdraw,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Off-chain mirror of one escrow contract log.
///
/// `(tx_hash, log_index)` identifies the physical log, so at most one event
/// exists per pair. Events are never deleted, the only mutation is filling
/// a missing `user_id` once the channel owner gets verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEvent {
    pub platform: Platform,
    pub platform_channel_id: String,
    /// `None` while the channel has no verified owner
    pub user_id: Option<UserID>,
    pub event_type: LedgerEventType,
    /// Token amount in the smallest unit
    pub amount_raw: U256,
    pub message: Option<String>,
    pub tx_hash: B256,
    pub log_index: u64,
    pub block_time: DateTime<Utc>,
}

impl LedgerEvent {
    pub fn natural_key(&self) -> (B256, u64) {
        (self.tx_hash, self.log_index)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
