// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::ResultIntoInternal;
use tipmnee_accounts::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct PayoutServiceImpl {
    payout_repo: Arc<dyn PayoutRepository>,
    ownership_service: Arc<dyn ChannelOwnershipService>,
}

#[dill::component(pub)]
#[dill::interface(dyn PayoutService)]
impl PayoutServiceImpl {
    pub fn new(
        payout_repo: Arc<dyn PayoutRepository>,
        ownership_service: Arc<dyn ChannelOwnershipService>,
    ) -> Self {
        Self {
            payout_repo,
            ownership_service,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl PayoutService for PayoutServiceImpl {
    async fn set_payout_address(
        &self,
        user_id: UserID,
        chain: PayoutChain,
        address: &str,
    ) -> Result<PayoutAddress, SetPayoutError> {
        let address = crypto_utils::parse_evm_address(address)?;

        let payout = PayoutAddress {
            user_id,
            chain,
            address,
        };
        self.payout_repo.set_payout_address(&payout).await.int_err()?;

        tracing::info!(
            %user_id,
            %chain,
            address = %crypto_utils::to_lowercase_hex(&address),
            "Payout address set"
        );

        Ok(payout)
    }

    async fn resolve_channel_payout(
        &self,
        platform: Platform,
        platform_channel_id: &str,
        chain: PayoutChain,
    ) -> Result<ChannelPayout, ResolveChannelPayoutError> {
        let platform_channel_id = platform_channel_id.trim();
        if platform_channel_id.is_empty() {
            return Err(ResolveChannelPayoutError::EmptyChannelId);
        }

        let Some(owner) = self
            .ownership_service
            .find_verified_owner(platform, platform_channel_id)
            .await?
        else {
            return Ok(ChannelPayout::Unclaimed);
        };

        let maybe_payout = self
            .payout_repo
            .find_payout_address(owner, chain)
            .await
            .int_err()?;

        Ok(match maybe_payout {
            Some(payout) => ChannelPayout::Direct {
                address: payout.address,
            },
            None => ChannelPayout::Unclaimed,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
