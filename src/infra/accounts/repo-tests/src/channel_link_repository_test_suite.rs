// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{SubsecRound, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tipmnee_accounts::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

async fn create_user(catalog: &dill::Catalog, wallet: &str) -> UserID {
    let identity_repo = catalog.get_one::<dyn IdentityRepository>().unwrap();

    identity_repo
        .create_user_with_identity(IdentityProvider::Wallet, wallet)
        .await
        .unwrap()
        .user_id
}

fn unverified_link(user_id: UserID, channel_id: &str) -> ChannelLink {
    ChannelLink {
        user_id,
        platform: Platform::YouTube,
        platform_channel_id: channel_id.to_string(),
        verified_at: None,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_and_find_channel_link(catalog: &dill::Catalog) {
    let user_id = create_user(catalog, "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf").await;
    let channel_link_repo = catalog.get_one::<dyn ChannelLinkRepository>().unwrap();

    assert_eq!(
        channel_link_repo
            .find_channel_link(Platform::YouTube, "UCxyz")
            .await
            .unwrap(),
        None
    );

    let link = unverified_link(user_id, "UCxyz");
    channel_link_repo.create_channel_link(&link).await.unwrap();

    assert_eq!(
        channel_link_repo
            .find_channel_link(Platform::YouTube, "UCxyz")
            .await
            .unwrap(),
        Some(link)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_duplicate_channel_link(catalog: &dill::Catalog) {
    let user_a = create_user(catalog, "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf").await;
    let user_b = create_user(catalog, "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23").await;
    let channel_link_repo = catalog.get_one::<dyn ChannelLinkRepository>().unwrap();

    channel_link_repo
        .create_channel_link(&unverified_link(user_a, "UCxyz"))
        .await
        .unwrap();

    let duplicate_result = channel_link_repo
        .create_channel_link(&unverified_link(user_b, "UCxyz"))
        .await;

    assert!(
        matches!(
            &duplicate_result,
            Err(CreateChannelLinkError::Duplicate {
                platform: Platform::YouTube,
                platform_channel_id,
            }) if platform_channel_id == "UCxyz"
        ),
        "{duplicate_result:?}"
    );

    let found = channel_link_repo
        .find_channel_link(Platform::YouTube, "UCxyz")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.user_id, user_a);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_mark_channel_link_verified(catalog: &dill::Catalog) {
    let user_id = create_user(catalog, "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf").await;
    let channel_link_repo = catalog.get_one::<dyn ChannelLinkRepository>().unwrap();

    let verified_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap().round_subsecs(6);

    let missing_result = channel_link_repo
        .mark_channel_link_verified(Platform::YouTube, "UCxyz", verified_at)
        .await;
    assert!(
        matches!(
            missing_result,
            Err(MarkChannelLinkVerifiedError::NotFound { .. })
        ),
        "{missing_result:?}"
    );

    channel_link_repo
        .create_channel_link(&unverified_link(user_id, "UCxyz"))
        .await
        .unwrap();
    channel_link_repo
        .mark_channel_link_verified(Platform::YouTube, "UCxyz", verified_at)
        .await
        .unwrap();

    let found = channel_link_repo
        .find_channel_link(Platform::YouTube, "UCxyz")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.verified_at, Some(verified_at));
    assert_eq!(found.verified_owner(), Some(user_id));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
