// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::Duration;
use crypto_utils::U256;
use dill::{Catalog, CatalogBuilder};
use pretty_assertions::assert_eq;
use tipmnee_accounts::{Platform, UserID};
use tipmnee_ledger::*;
use tipmnee_ledger_inmem::InMemoryLedgerEventRepository;
use tipmnee_ledger_services::LedgerQueryServiceImpl;

use crate::utils::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_empty_ledger() {
    let harness = LedgerQueryServiceHarness::new();

    assert_eq!(
        harness
            .query_service
            .earnings_summary(UserID::new(1))
            .await
            .unwrap(),
        EarningsSummary::default()
    );
    assert_eq!(
        harness
            .query_service
            .list_tips(UserID::new(1), PaginationOpts::default())
            .await
            .unwrap(),
        vec![]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_summary_and_tips_page() {
    let harness = LedgerQueryServiceHarness::new();

    for (hour, event_type, amount) in [
        (0, LedgerEventType::Tip, 10u64),
        (1, LedgerEventType::Tip, 20),
        (2, LedgerEventType::Withdraw, 25),
        (3, LedgerEventType::Tip, 30),
    ] {
        harness.insert(event_type, U256::from(amount), hour).await;
    }

    assert_eq!(
        harness
            .query_service
            .earnings_summary(UserID::new(1))
            .await
            .unwrap(),
        EarningsSummary {
            tips_count: 3,
            total_tipped_raw: U256::from(60u64),
            total_withdrawn_raw: U256::from(25u64),
            available_raw: U256::from(35u64),
        }
    );

    let page = harness
        .query_service
        .list_tips(UserID::new(1), PaginationOpts::new(Some(1), Some(1)))
        .await
        .unwrap();
    assert_eq!(
        page.iter().map(|event| event.amount_raw).collect::<Vec<_>>(),
        vec![U256::from(20u64)]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct LedgerQueryServiceHarness {
    _catalog: Catalog,
    ledger_event_repo: Arc<dyn LedgerEventRepository>,
    query_service: Arc<dyn LedgerQueryService>,
}

impl LedgerQueryServiceHarness {
    fn new() -> Self {
        let catalog = {
            let mut b = CatalogBuilder::new();
            b.add::<InMemoryLedgerEventRepository>();
            b.add::<LedgerQueryServiceImpl>();
            b.build()
        };

        Self {
            ledger_event_repo: catalog.get_one().unwrap(),
            query_service: catalog.get_one().unwrap(),
            _catalog: catalog,
        }
    }

    async fn insert(&self, event_type: LedgerEventType, amount_raw: U256, hour: u8) {
        self.ledger_event_repo
            .insert_event(&LedgerEvent {
                platform: Platform::YouTube,
                platform_channel_id: "UCxyz".to_string(),
                user_id: Some(UserID::new(1)),
                event_type,
                amount_raw,
                message: None,
                tx_hash: tx_hash(hour + 1),
                log_index: 0,
                block_time: block_time() + Duration::hours(i64::from(hour)),
            })
            .await
            .unwrap();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
