// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, TimeZone, Utc};
use crypto_utils::{Address, parse_evm_address};
use pretty_assertions::assert_eq;
use tipmnee_auth_wallet::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn wallet_a() -> Address {
    parse_evm_address("0x7e5f4552091a69125d5dfcb7b8c2659029395bdf").unwrap()
}

fn wallet_b() -> Address {
    parse_evm_address("0x2c7536e3605d9c16a7a3d7b1898e529396a65c23").unwrap()
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn challenge(wallet_address: Address, nonce: &str, expires_at: DateTime<Utc>) -> LoginChallenge {
    LoginChallenge::new(DEFAULT_LOGIN_APP_NAME, wallet_address, nonce.to_string(), expires_at)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_take_missing_challenge(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn LoginChallengeRepository>().unwrap();

    assert_eq!(
        repo.take_challenge(&wallet_a()).await,
        Err(TakeChallengeError::NotFound(ChallengeNotFoundError {
            wallet_address: wallet_a()
        }))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_and_take_challenge_once(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn LoginChallengeRepository>().unwrap();

    let challenge = challenge(wallet_a(), "nonce1", t0() + Duration::minutes(10));
    repo.set_challenge(&challenge).await.unwrap();

    assert_eq!(repo.take_challenge(&wallet_a()).await, Ok(challenge));
    assert_eq!(
        repo.take_challenge(&wallet_a()).await,
        Err(TakeChallengeError::NotFound(ChallengeNotFoundError {
            wallet_address: wallet_a()
        }))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_challenge_overwrites_previous(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn LoginChallengeRepository>().unwrap();

    let first = challenge(wallet_a(), "nonce1", t0() + Duration::minutes(10));
    let second = challenge(wallet_a(), "nonce2", t0() + Duration::minutes(20));
    let other_wallet = challenge(wallet_b(), "nonce3", t0() + Duration::minutes(10));

    repo.set_challenge(&first).await.unwrap();
    repo.set_challenge(&other_wallet).await.unwrap();
    repo.set_challenge(&second).await.unwrap();

    assert_eq!(repo.take_challenge(&wallet_a()).await, Ok(second));
    assert_eq!(repo.take_challenge(&wallet_b()).await, Ok(other_wallet));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_cleanup_expired_challenges(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn LoginChallengeRepository>().unwrap();

    let expired = challenge(wallet_a(), "nonce1", t0() - Duration::seconds(1));
    let live = challenge(wallet_b(), "nonce2", t0() + Duration::seconds(1));

    repo.set_challenge(&expired).await.unwrap();
    repo.set_challenge(&live).await.unwrap();

    assert_eq!(repo.cleanup_expired_challenges(t0()).await.unwrap(), 1);

    assert!(matches!(
        repo.take_challenge(&wallet_a()).await,
        Err(TakeChallengeError::NotFound(_))
    ));
    assert_eq!(repo.take_challenge(&wallet_b()).await, Ok(live));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_cleanup_keeps_challenge_during_expiry_second(catalog: &dill::Catalog) {
    let repo = catalog.get_one::<dyn LoginChallengeRepository>().unwrap();

    let expiring = challenge(wallet_a(), "nonce1", t0());
    repo.set_challenge(&expiring).await.unwrap();

    for now in [t0(), t0() + Duration::milliseconds(999)] {
        assert_eq!(repo.cleanup_expired_challenges(now).await.unwrap(), 0);
    }

    assert_eq!(
        repo.cleanup_expired_challenges(t0() + Duration::seconds(1))
            .await
            .unwrap(),
        1
    );
    assert!(matches!(
        repo.take_challenge(&wallet_a()).await,
        Err(TakeChallengeError::NotFound(_))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
