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
use tipmnee_accounts::{ChannelOwnershipError, UserID};

use crate::ClaimPayload;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait ClaimSigningService: Send + Sync {
    /// Signs a short-lived withdrawal authorization for the verified owner of
    /// a channel. Every call produces a fresh nonce.
    async fn sign_claim(
        &self,
        user_id: UserID,
        platform_channel_id: &str,
        payout_address: &str,
    ) -> Result<ClaimPayload, SignClaimError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SignClaimError {
    #[error("Channel id is required")]
    EmptyChannelId,

    #[error(transparent)]
    InvalidPayoutAddress(#[from] InvalidEvmAddressError),

    #[error(transparent)]
    Ownership(#[from] ChannelOwnershipError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
