// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::{Catalog, CatalogBuilder};
use tipmnee_auth_wallet_inmem::InMemoryLoginChallengeRepository;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_take_missing_challenge() {
    let harness = InMemoryLoginChallengeRepositoryHarness::new();
    tipmnee_auth_wallet_repo_tests::login_challenge_repository::test_take_missing_challenge(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_and_take_challenge_once() {
    let harness = InMemoryLoginChallengeRepositoryHarness::new();
    tipmnee_auth_wallet_repo_tests::login_challenge_repository::test_set_and_take_challenge_once(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_challenge_overwrites_previous() {
    let harness = InMemoryLoginChallengeRepositoryHarness::new();
    tipmnee_auth_wallet_repo_tests::login_challenge_repository::test_set_challenge_overwrites_previous(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_cleanup_expired_challenges() {
    let harness = InMemoryLoginChallengeRepositoryHarness::new();
    tipmnee_auth_wallet_repo_tests::login_challenge_repository::test_cleanup_expired_challenges(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_cleanup_keeps_challenge_during_expiry_second() {
    let harness = InMemoryLoginChallengeRepositoryHarness::new();
    tipmnee_auth_wallet_repo_tests::login_challenge_repository::test_cleanup_keeps_challenge_during_expiry_second(
        &harness.catalog,
    )
    .await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct InMemoryLoginChallengeRepositoryHarness {
    catalog: Catalog,
}

impl InMemoryLoginChallengeRepositoryHarness {
    pub fn new() -> Self {
        let mut catalog_builder = CatalogBuilder::new();
        catalog_builder.add::<InMemoryLoginChallengeRepository>();

        Self {
            catalog: catalog_builder.build(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
