// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crypto_utils::InvalidEvmAddressError;
use internal_error::InternalError;
use thiserror::Error;

use crate::{ChannelPayout, PayoutAddress, PayoutChain, Platform, UserID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait PayoutService: Send + Sync {
    async fn set_payout_address(
        &self,
        user_id: UserID,
        chain: PayoutChain,
        address: &str,
    ) -> Result<PayoutAddress, SetPayoutError>;

    /// Public lookup: tells a tipper whether a channel can be paid directly
    async fn resolve_channel_payout(
        &self,
        platform: Platform,
        platform_channel_id: &str,
        chain: PayoutChain,
    ) -> Result<ChannelPayout, ResolveChannelPayoutError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SetPayoutError {
    #[error(transparent)]
    InvalidAddress(#[from] InvalidEvmAddressError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ResolveChannelPayoutError {
    #[error("Channel id is required")]
    EmptyChannelId,

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
