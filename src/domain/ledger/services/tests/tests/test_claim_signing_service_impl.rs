// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use alloy_sol_types::SolStruct;
use chrono::{Duration, SubsecRound, TimeZone, Utc};
use crypto_utils::{
    Address,
    EvmSigningKey,
    InvalidEvmAddressError,
    U256,
    decode_signature_hex,
    keccak256,
    recover_address,
};
use dill::{Catalog, CatalogBuilder};
use pretty_assertions::{assert_eq, assert_ne};
use secrecy::SecretString;
use time_source::{SystemTimeSource, SystemTimeSourceStub};
use tipmnee_accounts::{ChannelLinkRepository, ChannelOwnershipError, UserID};
use tipmnee_accounts_inmem::InMemoryChannelLinkRepository;
use tipmnee_accounts_services::ChannelOwnershipServiceImpl;
use tipmnee_ledger::*;
use tipmnee_ledger_services::ClaimSigningServiceImpl;

use crate::utils::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const VERIFIER_PRIVATE_KEY: &str =
    "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

const PAYOUT_ADDRESS: &str = "0x2222222222222222222222222222222222222222";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_sign_claim() {
    let harness = ClaimSigningServiceHarness::new(VERIFIER_PRIVATE_KEY);
    link_channel(&harness.channel_link_repo, UserID::new(1), "UCxyz", true).await;

    let payload = harness
        .claim_signing_service
        .sign_claim(UserID::new(1), " UCxyz ", PAYOUT_ADDRESS)
        .await
        .unwrap();

    assert_eq!(payload.channel_id_hash, keccak256("UCxyz"));
    assert_eq!(payload.payout_address, Address::repeat_byte(0x22));
    // Ten minutes ahead, whole seconds only
    assert_eq!(
        payload.expiry,
        Utc.with_ymd_and_hms(2050, 1, 2, 12, 10, 0).unwrap()
    );

    assert!(payload.signature.starts_with("0x"));
    assert_eq!(payload.signature.len(), 2 + 65 * 2);
    let signature = decode_signature_hex(&payload.signature).unwrap();
    assert!(matches!(signature[64], 27 | 28));

    // Digest as the escrow contract computes it
    let onchain_claim = abi::Claim {
        channelIdHash: payload.channel_id_hash,
        payoutAddress: payload.payout_address,
        expiry: U256::from(payload.expiry.timestamp().unsigned_abs()),
        nonce: payload.nonce,
    };
    let onchain_domain = alloy_sol_types::Eip712Domain::new(
        Some("TipMNEE".into()),
        Some("1".into()),
        Some(U256::from(CHAIN_ID)),
        Some(escrow_contract()),
        None,
    );
    let digest = onchain_claim.eip712_signing_hash(&onchain_domain);

    let verifier = EvmSigningKey::from_hex(VERIFIER_PRIVATE_KEY).unwrap();
    assert_eq!(recover_address(&digest, &signature), Ok(verifier.address()));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_sign_claim_uses_fresh_nonces() {
    let harness = ClaimSigningServiceHarness::new(VERIFIER_PRIVATE_KEY);
    link_channel(&harness.channel_link_repo, UserID::new(1), "UCxyz", true).await;

    let first = harness
        .claim_signing_service
        .sign_claim(UserID::new(1), "UCxyz", PAYOUT_ADDRESS)
        .await
        .unwrap();
    let second = harness
        .claim_signing_service
        .sign_claim(UserID::new(1), "UCxyz", PAYOUT_ADDRESS)
        .await
        .unwrap();

    assert_eq!(first.expiry, second.expiry);
    assert_ne!(first.nonce, second.nonce);
    assert_ne!(first.signature, second.signature);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_sign_claim_expiry_follows_clock() {
    let harness = ClaimSigningServiceHarness::new(VERIFIER_PRIVATE_KEY);
    link_channel(&harness.channel_link_repo, UserID::new(1), "UCxyz", true).await;

    harness.time_source.advance(Duration::hours(1));

    let payload = harness
        .claim_signing_service
        .sign_claim(UserID::new(1), "UCxyz", PAYOUT_ADDRESS)
        .await
        .unwrap();

    assert_eq!(
        payload.expiry,
        harness.time_source.now().trunc_subsecs(0) + Duration::minutes(10)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_sign_claim_requires_verified_owner() {
    let harness = ClaimSigningServiceHarness::new(VERIFIER_PRIVATE_KEY);
    link_channel(&harness.channel_link_repo, UserID::new(1), "UCxyz", false).await;
    link_channel(&harness.channel_link_repo, UserID::new(2), "UCabc", true).await;

    assert!(matches!(
        harness
            .claim_signing_service
            .sign_claim(UserID::new(1), "UCnew", PAYOUT_ADDRESS)
            .await,
        Err(SignClaimError::Ownership(
            ChannelOwnershipError::NotLinked { .. }
        ))
    ));
    assert!(matches!(
        harness
            .claim_signing_service
            .sign_claim(UserID::new(1), "UCxyz", PAYOUT_ADDRESS)
            .await,
        Err(SignClaimError::Ownership(
            ChannelOwnershipError::NotVerified { .. }
        ))
    ));
    assert!(matches!(
        harness
            .claim_signing_service
            .sign_claim(UserID::new(1), "UCabc", PAYOUT_ADDRESS)
            .await,
        Err(SignClaimError::Ownership(
            ChannelOwnershipError::LinkedToAnotherUser { .. }
        ))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_sign_claim_rejects_malformed_request() {
    let harness = ClaimSigningServiceHarness::new(VERIFIER_PRIVATE_KEY);

    assert!(matches!(
        harness
            .claim_signing_service
            .sign_claim(UserID::new(1), "   ", PAYOUT_ADDRESS)
            .await,
        Err(SignClaimError::EmptyChannelId)
    ));

    // Payout address is validated before ownership
    match harness
        .claim_signing_service
        .sign_claim(UserID::new(1), "UCxyz", "0x1234")
        .await
    {
        Err(SignClaimError::InvalidPayoutAddress(e)) => assert_eq!(
            e,
            InvalidEvmAddressError {
                value: "0x1234".to_string()
            }
        ),
        res => panic!("Unexpected result: {res:?}"),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_sign_claim_with_broken_verifier_key() {
    let harness = ClaimSigningServiceHarness::new("0x1234");
    link_channel(&harness.channel_link_repo, UserID::new(1), "UCxyz", true).await;

    assert!(matches!(
        harness
            .claim_signing_service
            .sign_claim(UserID::new(1), "UCxyz", PAYOUT_ADDRESS)
            .await,
        Err(SignClaimError::Internal(_))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct ClaimSigningServiceHarness {
    _catalog: Catalog,
    time_source: SystemTimeSourceStub,
    channel_link_repo: Arc<dyn ChannelLinkRepository>,
    claim_signing_service: Arc<dyn ClaimSigningService>,
}

impl ClaimSigningServiceHarness {
    fn new(verifier_private_key: &str) -> Self {
        let time_source = SystemTimeSourceStub::new_set(
            Utc.with_ymd_and_hms(2050, 1, 2, 12, 0, 0).unwrap() + Duration::milliseconds(500),
        );

        let catalog = {
            let mut b = CatalogBuilder::new();
            b.add_value(time_source.clone());
            b.bind::<dyn SystemTimeSource, SystemTimeSourceStub>();
            b.add_value(EscrowConfig::new(CHAIN_ID, escrow_contract()));
            b.add_value(ClaimSigningConfig::new(SecretString::from(
                verifier_private_key,
            )));
            b.add::<InMemoryChannelLinkRepository>();
            b.add::<ChannelOwnershipServiceImpl>();
            b.add::<ClaimSigningServiceImpl>();
            b.build()
        };

        Self {
            time_source,
            channel_link_repo: catalog.get_one().unwrap(),
            claim_signing_service: catalog.get_one().unwrap(),
            _catalog: catalog,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
