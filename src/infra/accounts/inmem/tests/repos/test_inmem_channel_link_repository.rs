// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tipmnee_accounts_inmem::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_and_find_channel_link() {
    let harness = InMemoryAccountsRepositoryHarness::new();
    tipmnee_accounts_repo_tests::channel_link_repository::test_create_and_find_channel_link(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_duplicate_channel_link() {
    let harness = InMemoryAccountsRepositoryHarness::new();
    tipmnee_accounts_repo_tests::channel_link_repository::test_create_duplicate_channel_link(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_mark_channel_link_verified() {
    let harness = InMemoryAccountsRepositoryHarness::new();
    tipmnee_accounts_repo_tests::channel_link_repository::test_mark_channel_link_verified(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct InMemoryAccountsRepositoryHarness {
    catalog: dill::Catalog,
}

impl InMemoryAccountsRepositoryHarness {
    pub fn new() -> Self {
        let mut b = dill::CatalogBuilder::new();
        b.add::<InMemoryIdentityRepository>();
        b.add::<InMemoryChannelLinkRepository>();

        Self { catalog: b.build() }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
