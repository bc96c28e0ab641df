// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, TimeZone, Utc};
use crypto_utils::{B256, U256};
use pretty_assertions::assert_eq;
use tipmnee_accounts::{IdentityProvider, IdentityRepository, Platform, UserID};
use tipmnee_ledger::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn ledger_event(
    platform_channel_id: &str,
    user_id: Option<UserID>,
    event_type: LedgerEventType,
    amount_raw: U256,
    tx_byte: u8,
    log_index: u64,
    block_time: DateTime<Utc>,
) -> LedgerEvent {
    LedgerEvent {
        platform: Platform::YouTube,
        platform_channel_id: platform_channel_id.to_string(),
        user_id,
        event_type,
        amount_raw,
        message: match event_type {
            LedgerEventType::Tip => Some(format!("tip {tx_byte}:{log_index}")),
            LedgerEventType::Withdraw => None,
        },
        tx_hash: B256::repeat_byte(tx_byte),
        log_index,
        block_time,
    }
}

async fn new_user(catalog: &dill::Catalog, wallet: &str) -> UserID {
    let identity_repo = catalog.get_one::<dyn IdentityRepository>().unwrap();

    identity_repo
        .create_user_with_identity(IdentityProvider::Wallet, wallet)
        .await
        .unwrap()
        .user_id
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_insert_and_list_tip(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn LedgerEventRepository>().unwrap();
    let user_id = new_user(catalog, "0xaa").await;

    let amount: U256 = "123456789012345678901234567890".parse().unwrap();
    let tip = ledger_event(
        "UCxyz",
        Some(user_id),
        LedgerEventType::Tip,
        amount,
        1,
        0,
        t0(),
    );

    repo.insert_event(&tip).await.unwrap();

    assert_eq!(
        repo.list_tips_for_user(user_id, &PaginationOpts::default())
            .await
            .unwrap(),
        vec![tip]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_insert_duplicate_event(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn LedgerEventRepository>().unwrap();

    let tip = ledger_event(
        "UCxyz",
        None,
        LedgerEventType::Tip,
        U256::from(10u64),
        1,
        3,
        t0(),
    );
    repo.insert_event(&tip).await.unwrap();

    // Same log, different payload, still a duplicate
    let replay = LedgerEvent {
        amount_raw: U256::from(999u64),
        ..tip.clone()
    };

    match repo.insert_event(&replay).await {
        Err(InsertLedgerEventError::Duplicate(e)) => assert_eq!(
            e,
            InsertLedgerEventErrorDuplicate {
                tx_hash: B256::repeat_byte(1),
                log_index: 3,
            }
        ),
        res => panic!("Unexpected result: {res:?}"),
    }

    // Other logs of the same transaction are distinct events
    let sibling = LedgerEvent {
        log_index: 4,
        ..tip
    };
    repo.insert_event(&sibling).await.unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_backfill_user_for_channel(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn LedgerEventRepository>().unwrap();
    let owner = new_user(catalog, "0xaa").await;
    let other_user = new_user(catalog, "0xbb").await;

    for event in [
        ledger_event("UCxyz", None, LedgerEventType::Tip, U256::from(1u64), 1, 0, t0()),
        ledger_event("UCxyz", None, LedgerEventType::Tip, U256::from(2u64), 2, 0, t0()),
        ledger_event("UCabc", None, LedgerEventType::Tip, U256::from(4u64), 3, 0, t0()),
        ledger_event(
            "UCxyz",
            Some(other_user),
            LedgerEventType::Tip,
            U256::from(8u64),
            4,
            0,
            t0(),
        ),
    ] {
        repo.insert_event(&event).await.unwrap();
    }

    assert_eq!(
        repo.backfill_user_for_channel(Platform::YouTube, "UCxyz", owner)
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        repo.backfill_user_for_channel(Platform::YouTube, "UCxyz", owner)
            .await
            .unwrap(),
        0
    );

    let owner_summary = repo.get_earnings_summary_for_user(owner).await.unwrap();
    assert_eq!(owner_summary.tips_count, 2);
    assert_eq!(owner_summary.total_tipped_raw, U256::from(3u64));

    // Already attributed events keep their user
    let other_summary = repo
        .get_earnings_summary_for_user(other_user)
        .await
        .unwrap();
    assert_eq!(other_summary.tips_count, 1);
    assert_eq!(other_summary.total_tipped_raw, U256::from(8u64));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_list_tips_order_and_pagination(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn LedgerEventRepository>().unwrap();
    let user_id = new_user(catalog, "0xaa").await;

    let oldest = ledger_event(
        "UCxyz",
        Some(user_id),
        LedgerEventType::Tip,
        U256::from(1u64),
        1,
        0,
        t0(),
    );
    let newest = ledger_event(
        "UCxyz",
        Some(user_id),
        LedgerEventType::Tip,
        U256::from(2u64),
        2,
        0,
        t0() + Duration::hours(2),
    );
    let middle_second_log = ledger_event(
        "UCxyz",
        Some(user_id),
        LedgerEventType::Tip,
        U256::from(3u64),
        3,
        1,
        t0() + Duration::hours(1),
    );
    let middle_first_log = ledger_event(
        "UCxyz",
        Some(user_id),
        LedgerEventType::Tip,
        U256::from(4u64),
        3,
        0,
        t0() + Duration::hours(1),
    );
    let withdrawal = ledger_event(
        "UCxyz",
        Some(user_id),
        LedgerEventType::Withdraw,
        U256::from(1u64),
        4,
        0,
        t0() + Duration::hours(3),
    );

    for event in [
        &oldest,
        &newest,
        &middle_second_log,
        &middle_first_log,
        &withdrawal,
    ] {
        repo.insert_event(event).await.unwrap();
    }

    assert_eq!(
        repo.list_tips_for_user(user_id, &PaginationOpts::default())
            .await
            .unwrap(),
        vec![
            newest.clone(),
            middle_first_log.clone(),
            middle_second_log.clone(),
            oldest.clone(),
        ]
    );
    assert_eq!(
        repo.list_tips_for_user(user_id, &PaginationOpts::new(Some(2), Some(1)))
            .await
            .unwrap(),
        vec![middle_first_log, middle_second_log]
    );
    assert_eq!(
        repo.list_tips_for_user(user_id, &PaginationOpts::new(Some(2), Some(4)))
            .await
            .unwrap(),
        vec![]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_earnings_summary(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn LedgerEventRepository>().unwrap();
    let user_id = new_user(catalog, "0xaa").await;
    let other_user = new_user(catalog, "0xbb").await;

    assert_eq!(
        repo.get_earnings_summary_for_user(user_id).await.unwrap(),
        EarningsSummary::new(0, U256::ZERO, U256::ZERO)
    );

    let big: U256 = "100000000000000000000000000000".parse().unwrap();

    for event in [
        ledger_event("UCxyz", Some(user_id), LedgerEventType::Tip, big, 1, 0, t0()),
        ledger_event("UCxyz", Some(user_id), LedgerEventType::Tip, U256::from(5u64), 1, 1, t0()),
        ledger_event(
            "UCxyz",
            Some(user_id),
            LedgerEventType::Withdraw,
            U256::from(7u64),
            2,
            0,
            t0(),
        ),
        ledger_event("UCabc", Some(other_user), LedgerEventType::Tip, big, 3, 0, t0()),
    ] {
        repo.insert_event(&event).await.unwrap();
    }

    assert_eq!(
        repo.get_earnings_summary_for_user(user_id).await.unwrap(),
        EarningsSummary::new(2, big + U256::from(5u64), U256::from(7u64))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
