// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::UserID;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
pub enum Platform {
    #[strum(serialize = "youtube")]
    YouTube,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Binding of a creator channel to a user. The link only proves ownership
/// once `verified_at` is set by the platform OAuth flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLink {
    pub user_id: UserID,
    pub platform: Platform,
    pub platform_channel_id: String,
    pub verified_at: Option<DateTime<Utc>>,
}

impl ChannelLink {
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }

    pub fn verified_owner(&self) -> Option<UserID> {
        self.is_verified().then_some(self.user_id)
    }

    pub fn ensure_verified_owner(&self, user_id: UserID) -> Result<(), ChannelOwnershipError> {
        if self.user_id != user_id {
            return Err(ChannelOwnershipError::LinkedToAnotherUser {
                platform: self.platform,
                platform_channel_id: self.platform_channel_id.clone(),
            });
        }

        if !self.is_verified() {
            return Err(ChannelOwnershipError::NotVerified {
                platform: self.platform,
                platform_channel_id: self.platform_channel_id.clone(),
            });
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelOwnershipError {
    #[error("Channel {platform}/{platform_channel_id} is not linked")]
    NotLinked {
        platform: Platform,
        platform_channel_id: String,
    },

    #[error("Channel {platform}/{platform_channel_id} is linked to another user")]
    LinkedToAnotherUser {
        platform: Platform,
        platform_channel_id: String,
    },

    #[error("Channel {platform}/{platform_channel_id} is not verified")]
    NotVerified {
        platform: Platform,
        platform_channel_id: String,
    },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
