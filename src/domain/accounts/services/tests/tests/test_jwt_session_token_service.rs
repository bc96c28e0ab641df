// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use dill::{Catalog, CatalogBuilder};
use pretty_assertions::assert_eq;
use time_source::{SystemTimeSource, SystemTimeSourceStub};
use tipmnee_accounts::{JwtAuthenticationConfig, SessionTokenError, SessionTokenService, UserID};
use tipmnee_accounts_services::JwtSessionTokenService;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_issue_and_verify_session_token() {
    let harness = JwtSessionTokenServiceHarness::new("secret");

    let token = harness
        .session_token_service
        .issue_session_token(UserID::new(42))
        .unwrap();

    assert_eq!(
        harness
            .session_token_service
            .user_id_by_session_token(&token)
            .unwrap(),
        UserID::new(42)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_session_token_expires_after_ttl() {
    let harness = JwtSessionTokenServiceHarness::new("secret");

    let token = harness
        .session_token_service
        .issue_session_token(UserID::new(42))
        .unwrap();

    harness
        .time_source
        .advance(chrono::Duration::hours(24) - chrono::Duration::seconds(1));
    assert!(
        harness
            .session_token_service
            .user_id_by_session_token(&token)
            .is_ok()
    );

    harness.time_source.advance(chrono::Duration::seconds(1));
    assert!(matches!(
        harness.session_token_service.user_id_by_session_token(&token),
        Err(SessionTokenError::Expired)
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_session_token_signed_with_other_secret() {
    let issuer = JwtSessionTokenServiceHarness::new("secret");
    let verifier = JwtSessionTokenServiceHarness::new("another-secret");

    let token = issuer
        .session_token_service
        .issue_session_token(UserID::new(42))
        .unwrap();

    assert!(matches!(
        verifier.session_token_service.user_id_by_session_token(&token),
        Err(SessionTokenError::Invalid(_))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_garbage_session_token() {
    let harness = JwtSessionTokenServiceHarness::new("secret");

    assert!(matches!(
        harness
            .session_token_service
            .user_id_by_session_token("not-a-jwt"),
        Err(SessionTokenError::Invalid(_))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct JwtSessionTokenServiceHarness {
    _catalog: Catalog,
    time_source: SystemTimeSourceStub,
    session_token_service: Arc<dyn SessionTokenService>,
}

impl JwtSessionTokenServiceHarness {
    fn new(jwt_secret: &str) -> Self {
        let time_source =
            SystemTimeSourceStub::new_set(Utc.with_ymd_and_hms(2050, 1, 2, 12, 0, 0).unwrap());

        let catalog = {
            let mut b = CatalogBuilder::new();
            b.add::<JwtSessionTokenService>();
            b.add_value(JwtAuthenticationConfig::new(Some(jwt_secret.to_string())));
            b.add_value(time_source.clone());
            b.bind::<dyn SystemTimeSource, SystemTimeSourceStub>();
            b.build()
        };

        Self {
            session_token_service: catalog.get_one().unwrap(),
            time_source,
            _catalog: catalog,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
