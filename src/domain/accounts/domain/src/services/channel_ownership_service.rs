// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{ChannelLink, ChannelOwnershipError, Platform, UserID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait ChannelOwnershipService: Send + Sync {
    /// Owner of the channel, if the channel link is verified
    async fn find_verified_owner(
        &self,
        platform: Platform,
        platform_channel_id: &str,
    ) -> Result<Option<UserID>, InternalError>;

    async fn ensure_verified_owner(
        &self,
        user_id: UserID,
        platform: Platform,
        platform_channel_id: &str,
    ) -> Result<ChannelLink, EnsureChannelOwnerError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum EnsureChannelOwnerError {
    #[error(transparent)]
    Ownership(#[from] ChannelOwnershipError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
