// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use dill::{Catalog, CatalogBuilder};
use pretty_assertions::assert_eq;
use tipmnee_accounts::*;
use tipmnee_accounts_inmem::InMemoryChannelLinkRepository;
use tipmnee_accounts_services::ChannelOwnershipServiceImpl;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_verified_owner_of_unknown_channel() {
    let harness = ChannelOwnershipServiceHarness::new();

    assert_eq!(
        harness
            .ownership_service
            .find_verified_owner(Platform::YouTube, "UCxyz")
            .await
            .unwrap(),
        None
    );

    assert!(matches!(
        harness
            .ownership_service
            .ensure_verified_owner(UserID::new(1), Platform::YouTube, "UCxyz")
            .await,
        Err(EnsureChannelOwnerError::Ownership(
            ChannelOwnershipError::NotLinked { .. }
        ))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unverified_link_has_no_owner() {
    let harness = ChannelOwnershipServiceHarness::new();
    harness.link_channel(UserID::new(1), "UCxyz").await;

    assert_eq!(
        harness
            .ownership_service
            .find_verified_owner(Platform::YouTube, "UCxyz")
            .await
            .unwrap(),
        None
    );

    assert!(matches!(
        harness
            .ownership_service
            .ensure_verified_owner(UserID::new(1), Platform::YouTube, "UCxyz")
            .await,
        Err(EnsureChannelOwnerError::Ownership(
            ChannelOwnershipError::NotVerified { .. }
        ))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_verified_owner() {
    let harness = ChannelOwnershipServiceHarness::new();
    harness.link_channel(UserID::new(1), "UCxyz").await;
    harness.verify_channel("UCxyz").await;

    assert_eq!(
        harness
            .ownership_service
            .find_verified_owner(Platform::YouTube, "UCxyz")
            .await
            .unwrap(),
        Some(UserID::new(1))
    );

    let link = harness
        .ownership_service
        .ensure_verified_owner(UserID::new(1), Platform::YouTube, "UCxyz")
        .await
        .unwrap();
    assert_eq!(link.user_id, UserID::new(1));
    assert!(link.is_verified());

    assert!(matches!(
        harness
            .ownership_service
            .ensure_verified_owner(UserID::new(2), Platform::YouTube, "UCxyz")
            .await,
        Err(EnsureChannelOwnerError::Ownership(
            ChannelOwnershipError::LinkedToAnotherUser { .. }
        ))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct ChannelOwnershipServiceHarness {
    _catalog: Catalog,
    channel_link_repo: Arc<dyn ChannelLinkRepository>,
    ownership_service: Arc<dyn ChannelOwnershipService>,
}

impl ChannelOwnershipServiceHarness {
    fn new() -> Self {
        let catalog = {
            let mut b = CatalogBuilder::new();
            b.add::<InMemoryChannelLinkRepository>();
            b.add::<ChannelOwnershipServiceImpl>();
            b.build()
        };

        Self {
            channel_link_repo: catalog.get_one().unwrap(),
            ownership_service: catalog.get_one().unwrap(),
            _catalog: catalog,
        }
    }

    async fn link_channel(&self, user_id: UserID, platform_channel_id: &str) {
        self.channel_link_repo
            .create_channel_link(&ChannelLink {
                user_id,
                platform: Platform::YouTube,
                platform_channel_id: platform_channel_id.to_string(),
                verified_at: None,
            })
            .await
            .unwrap();
    }

    async fn verify_channel(&self, platform_channel_id: &str) {
        self.channel_link_repo
            .mark_channel_link_verified(
                Platform::YouTube,
                platform_channel_id,
                Utc.with_ymd_and_hms(2050, 1, 1, 0, 0, 0).unwrap(),
            )
            .await
            .unwrap();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
