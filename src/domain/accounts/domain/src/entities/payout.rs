// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crypto_utils::Address;

use crate::UserID;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum PayoutChain {
    Ethereum,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Where a user wants to receive direct tips. At most one per chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutAddress {
    pub user_id: UserID,
    pub chain: PayoutChain,
    pub address: Address,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// How a tipper should pay a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelPayout {
    /// The channel is verified-owned and its owner set a payout address
    Direct { address: Address },
    /// Anything else: the tip goes through the escrow contract
    Unclaimed,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
