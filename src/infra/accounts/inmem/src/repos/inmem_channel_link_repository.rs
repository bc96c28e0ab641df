// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    links: HashMap<(Platform, String), ChannelLink>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryChannelLinkRepository {
    state: Arc<RwLock<State>>,
}

#[dill::component(pub)]
#[dill::interface(dyn ChannelLinkRepository)]
#[dill::scope(dill::Singleton)]
impl InMemoryChannelLinkRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ChannelLinkRepository for InMemoryChannelLinkRepository {
    async fn create_channel_link(&self, link: &ChannelLink) -> Result<(), CreateChannelLinkError> {
        let mut writable_state = self.state.write().await;

        let key = (link.platform, link.platform_channel_id.clone());
        if writable_state.links.contains_key(&key) {
            return Err(CreateChannelLinkError::Duplicate {
                platform: link.platform,
                platform_channel_id: link.platform_channel_id.clone(),
            });
        }

        writable_state.links.insert(key, link.clone());

        Ok(())
    }

    async fn find_channel_link(
        &self,
        platform: Platform,
        platform_channel_id: &str,
    ) -> Result<Option<ChannelLink>, FindChannelLinkError> {
        let readable_state = self.state.read().await;

        Ok(readable_state
            .links
            .get(&(platform, platform_channel_id.to_string()))
            .cloned())
    }

    async fn mark_channel_link_verified(
        &self,
        platform: Platform,
        platform_channel_id: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<(), MarkChannelLinkVerifiedError> {
        let mut writable_state = self.state.write().await;

        let Some(link) = writable_state
            .links
            .get_mut(&(platform, platform_channel_id.to_string()))
        else {
            return Err(MarkChannelLinkVerifiedError::NotFound {
                platform,
                platform_channel_id: platform_channel_id.to_string(),
            });
        };

        link.verified_at = Some(verified_at);

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
