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

async fn create_user(catalog: &dill::Catalog, wallet: &str) -> UserID {
    let identity_repo = catalog.get_one::<dyn IdentityRepository>().unwrap();

    identity_repo
        .create_user_with_identity(IdentityProvider::Wallet, wallet)
        .await
        .unwrap()
        .user_id
}

fn ethereum_payout(user_id: UserID, address: &str) -> PayoutAddress {
    PayoutAddress {
        user_id,
        chain: PayoutChain::Ethereum,
        address: crypto_utils::parse_evm_address(address).unwrap(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_and_find_payout_address(catalog: &dill::Catalog) {
    let user_id = create_user(catalog, "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf").await;
    let payout_repo = catalog.get_one::<dyn PayoutRepository>().unwrap();

    assert_eq!(
        payout_repo
            .find_payout_address(user_id, PayoutChain::Ethereum)
            .await
            .unwrap(),
        None
    );

    let payout = ethereum_payout(user_id, "0x6813eb9362372eef6200f3b1dbc3f819671cba69");
    payout_repo.set_payout_address(&payout).await.unwrap();

    assert_eq!(
        payout_repo
            .find_payout_address(user_id, PayoutChain::Ethereum)
            .await
            .unwrap(),
        Some(payout)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_payout_address_replaces_previous(catalog: &dill::Catalog) {
    let user_a = create_user(catalog, "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf").await;
    let user_b = create_user(catalog, "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23").await;
    let payout_repo = catalog.get_one::<dyn PayoutRepository>().unwrap();

    payout_repo
        .set_payout_address(&ethereum_payout(
            user_a,
            "0x6813eb9362372eef6200f3b1dbc3f819671cba69",
        ))
        .await
        .unwrap();

    let replacement = ethereum_payout(user_a, "0x1eff47bc3a10a45d4b230b5d10e37751fe6aa718");
    payout_repo.set_payout_address(&replacement).await.unwrap();

    assert_eq!(
        payout_repo
            .find_payout_address(user_a, PayoutChain::Ethereum)
            .await
            .unwrap(),
        Some(replacement)
    );
    assert_eq!(
        payout_repo
            .find_payout_address(user_b, PayoutChain::Ethereum)
            .await
            .unwrap(),
        None
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
