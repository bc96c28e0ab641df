// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use pretty_assertions::assert_eq;
use tipmnee_accounts::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const WALLET_A: &str = "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf";
const WALLET_B: &str = "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_find_missing_identity(catalog: &dill::Catalog) {
    let identity_repo = catalog.get_one::<dyn IdentityRepository>().unwrap();

    let maybe_identity = identity_repo
        .find_identity(IdentityProvider::Wallet, WALLET_A)
        .await
        .unwrap();

    assert_eq!(maybe_identity, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_and_find_identity(catalog: &dill::Catalog) {
    let identity_repo = catalog.get_one::<dyn IdentityRepository>().unwrap();

    let created = identity_repo
        .create_user_with_identity(IdentityProvider::Wallet, WALLET_A)
        .await
        .unwrap();

    assert_eq!(created.provider, IdentityProvider::Wallet);
    assert_eq!(created.provider_user_id, WALLET_A);

    let found = identity_repo
        .find_identity(IdentityProvider::Wallet, WALLET_A)
        .await
        .unwrap();
    assert_eq!(found, Some(created));

    // Same subject under another provider is a different identity
    let other_provider = identity_repo
        .find_identity(IdentityProvider::Google, WALLET_A)
        .await
        .unwrap();
    assert_eq!(other_provider, None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_duplicate_identity(catalog: &dill::Catalog) {
    let identity_repo = catalog.get_one::<dyn IdentityRepository>().unwrap();

    let created = identity_repo
        .create_user_with_identity(IdentityProvider::Wallet, WALLET_A)
        .await
        .unwrap();

    let duplicate_result = identity_repo
        .create_user_with_identity(IdentityProvider::Wallet, WALLET_A)
        .await;

    match duplicate_result {
        Err(CreateIdentityError::Duplicate(e)) => assert_eq!(
            e,
            CreateIdentityErrorDuplicate {
                provider: IdentityProvider::Wallet,
                provider_user_id: WALLET_A.to_string(),
            }
        ),
        other => panic!("Expected a duplicate error, got: {other:?}"),
    }

    // The original binding is left intact
    let found = identity_repo
        .find_identity(IdentityProvider::Wallet, WALLET_A)
        .await
        .unwrap();
    assert_eq!(found.map(|i| i.user_id), Some(created.user_id));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_distinct_identities_get_distinct_users(catalog: &dill::Catalog) {
    let identity_repo = catalog.get_one::<dyn IdentityRepository>().unwrap();

    let a = identity_repo
        .create_user_with_identity(IdentityProvider::Wallet, WALLET_A)
        .await
        .unwrap();
    let b = identity_repo
        .create_user_with_identity(IdentityProvider::Wallet, WALLET_B)
        .await
        .unwrap();

    assert_ne!(a.user_id, b.user_id);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
