// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::{Catalog, CatalogBuilder};
use sqlx::PgPool;
use tipmnee_accounts_postgres::PostgresIdentityRepository;
use tipmnee_ledger_postgres::PostgresLedgerEventRepository;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/postgres"))]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_insert_and_list_tip(pg_pool: PgPool) {
    let harness = PostgresLedgerEventRepositoryHarness::new(pg_pool);
    tipmnee_ledger_repo_tests::ledger_event_repository::test_insert_and_list_tip(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/postgres"))]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_insert_duplicate_event(pg_pool: PgPool) {
    let harness = PostgresLedgerEventRepositoryHarness::new(pg_pool);
    tipmnee_ledger_repo_tests::ledger_event_repository::test_insert_duplicate_event(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/postgres"))]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_backfill_user_for_channel(pg_pool: PgPool) {
    let harness = PostgresLedgerEventRepositoryHarness::new(pg_pool);
    tipmnee_ledger_repo_tests::ledger_event_repository::test_backfill_user_for_channel(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/postgres"))]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_list_tips_order_and_pagination(pg_pool: PgPool) {
    let harness = PostgresLedgerEventRepositoryHarness::new(pg_pool);
    tipmnee_ledger_repo_tests::ledger_event_repository::test_list_tips_order_and_pagination(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/postgres"))]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_earnings_summary(pg_pool: PgPool) {
    let harness = PostgresLedgerEventRepositoryHarness::new(pg_pool);
    tipmnee_ledger_repo_tests::ledger_event_repository::test_earnings_summary(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct PostgresLedgerEventRepositoryHarness {
    catalog: Catalog,
}

impl PostgresLedgerEventRepositoryHarness {
    pub fn new(pg_pool: PgPool) -> Self {
        let mut b = CatalogBuilder::new();
        b.add_value(pg_pool);
        b.add::<PostgresIdentityRepository>();
        b.add::<PostgresLedgerEventRepository>();

        Self { catalog: b.build() }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
