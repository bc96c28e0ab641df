// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::{InternalError, ResultIntoInternal};
use tipmnee_accounts::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ChannelOwnershipServiceImpl {
    channel_link_repo: Arc<dyn ChannelLinkRepository>,
}

#[dill::component(pub)]
#[dill::interface(dyn ChannelOwnershipService)]
impl ChannelOwnershipServiceImpl {
    pub fn new(channel_link_repo: Arc<dyn ChannelLinkRepository>) -> Self {
        Self { channel_link_repo }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ChannelOwnershipService for ChannelOwnershipServiceImpl {
    async fn find_verified_owner(
        &self,
        platform: Platform,
        platform_channel_id: &str,
    ) -> Result<Option<UserID>, InternalError> {
        let maybe_link = self
            .channel_link_repo
            .find_channel_link(platform, platform_channel_id)
            .await
            .int_err()?;

        Ok(maybe_link.and_then(|link| link.verified_owner()))
    }

    async fn ensure_verified_owner(
        &self,
        user_id: UserID,
        platform: Platform,
        platform_channel_id: &str,
    ) -> Result<ChannelLink, EnsureChannelOwnerError> {
        let Some(link) = self
            .channel_link_repo
            .find_channel_link(platform, platform_channel_id)
            .await
            .int_err()?
        else {
            return Err(ChannelOwnershipError::NotLinked {
                platform,
                platform_channel_id: platform_channel_id.to_string(),
            }
            .into());
        };

        if let Err(e) = link.ensure_verified_owner(user_id) {
            tracing::debug!(%user_id, error = %e, "Channel ownership check failed");
            return Err(e.into());
        }

        Ok(link)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
