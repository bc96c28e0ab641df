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
use tipmnee_accounts_postgres::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/postgres"))]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_find_missing_identity(pg_pool: PgPool) {
    let harness = PostgresAccountsRepositoryHarness::new(pg_pool);
    tipmnee_accounts_repo_tests::identity_repository::test_find_missing_identity(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/postgres"))]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_create_and_find_identity(pg_pool: PgPool) {
    let harness = PostgresAccountsRepositoryHarness::new(pg_pool);
    tipmnee_accounts_repo_tests::identity_repository::test_create_and_find_identity(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/postgres"))]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_create_duplicate_identity(pg_pool: PgPool) {
    let harness = PostgresAccountsRepositoryHarness::new(pg_pool);
    tipmnee_accounts_repo_tests::identity_repository::test_create_duplicate_identity(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/postgres"))]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_distinct_identities_get_distinct_users(pg_pool: PgPool) {
    let harness = PostgresAccountsRepositoryHarness::new(pg_pool);
    tipmnee_accounts_repo_tests::identity_repository::test_distinct_identities_get_distinct_users(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct PostgresAccountsRepositoryHarness {
    catalog: Catalog,
}

impl PostgresAccountsRepositoryHarness {
    pub fn new(pg_pool: PgPool) -> Self {
        let mut b = CatalogBuilder::new();
        b.add_value(pg_pool);
        b.add::<PostgresIdentityRepository>();
        b.add::<PostgresChannelLinkRepository>();

        Self { catalog: b.build() }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
