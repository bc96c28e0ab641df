// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::{Catalog, CatalogBuilder};
use tipmnee_accounts_inmem::InMemoryIdentityRepository;
use tipmnee_ledger_inmem::InMemoryLedgerEventRepository;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_insert_and_list_tip() {
    let harness = InMemoryLedgerEventRepositoryHarness::new();
    tipmnee_ledger_repo_tests::ledger_event_repository::test_insert_and_list_tip(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_insert_duplicate_event() {
    let harness = InMemoryLedgerEventRepositoryHarness::new();
    tipmnee_ledger_repo_tests::ledger_event_repository::test_insert_duplicate_event(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_backfill_user_for_channel() {
    let harness = InMemoryLedgerEventRepositoryHarness::new();
    tipmnee_ledger_repo_tests::ledger_event_repository::test_backfill_user_for_channel(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_list_tips_order_and_pagination() {
    let harness = InMemoryLedgerEventRepositoryHarness::new();
    tipmnee_ledger_repo_tests::ledger_event_repository::test_list_tips_order_and_pagination(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_earnings_summary() {
    let harness = InMemoryLedgerEventRepositoryHarness::new();
    tipmnee_ledger_repo_tests::ledger_event_repository::test_earnings_summary(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct InMemoryLedgerEventRepositoryHarness {
    catalog: Catalog,
}

impl InMemoryLedgerEventRepositoryHarness {
    pub fn new() -> Self {
        let mut catalog_builder = CatalogBuilder::new();
        catalog_builder.add::<InMemoryIdentityRepository>();
        catalog_builder.add::<InMemoryLedgerEventRepository>();

        Self {
            catalog: catalog_builder.build(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
