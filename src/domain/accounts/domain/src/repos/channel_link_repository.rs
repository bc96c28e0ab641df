// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use internal_error::InternalError;
use thiserror::Error;

use crate::{ChannelLink, Platform};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait ChannelLinkRepository: Send + Sync {
    async fn create_channel_link(&self, link: &ChannelLink) -> Result<(), CreateChannelLinkError>;

    async fn find_channel_link(
        &self,
        platform: Platform,
        platform_channel_id: &str,
    ) -> Result<Option<ChannelLink>, FindChannelLinkError>;

    async fn mark_channel_link_verified(
        &self,
        platform: Platform,
        platform_channel_id: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<(), MarkChannelLinkVerifiedError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CreateChannelLinkError {
    #[error("Channel {platform}/{platform_channel_id} is already linked")]
    Duplicate {
        platform: Platform,
        platform_channel_id: String,
    },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FindChannelLinkError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum MarkChannelLinkVerifiedError {
    #[error("Channel {platform}/{platform_channel_id} is not linked")]
    NotFound {
        platform: Platform,
        platform_channel_id: String,
    },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
