// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::{InternalError, ResultIntoInternal};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use time_source::SystemTimeSource;
use tipmnee_accounts::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const SESSION_JWT_ALGORITHM: Algorithm = Algorithm::HS256;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct JwtSessionTokenService {
    time_source: Arc<dyn SystemTimeSource>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: chrono::Duration,
}

#[dill::component(pub)]
#[dill::interface(dyn SessionTokenService)]
impl JwtSessionTokenService {
    pub fn new(
        config: Arc<JwtAuthenticationConfig>,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Self {
        let secret = config.jwt_secret.expose_secret().as_bytes();

        Self {
            time_source,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_ttl: config.token_ttl,
        }
    }
}

impl SessionTokenService for JwtSessionTokenService {
    fn issue_session_token(&self, user_id: UserID) -> Result<String, InternalError> {
        let now = self.time_source.now();

        let claims = SessionTokenClaims {
            user_id: user_id.as_i64(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        encode(&Header::new(SESSION_JWT_ALGORITHM), &claims, &self.encoding_key).int_err()
    }

    fn user_id_by_session_token(&self, session_token: &str) -> Result<UserID, SessionTokenError> {
        // Expiration is checked against the injected clock below
        let mut validation = Validation::new(SESSION_JWT_ALGORITHM);
        validation.validate_exp = false;

        let token_data =
            decode::<SessionTokenClaims>(session_token, &self.decoding_key, &validation).map_err(
                |e| match *e.kind() {
                    ErrorKind::ExpiredSignature => SessionTokenError::Expired,
                    _ => SessionTokenError::Invalid(Box::new(e)),
                },
            )?;

        if token_data.claims.exp <= self.time_source.now().timestamp() {
            return Err(SessionTokenError::Expired);
        }

        Ok(UserID::new(token_data.claims.user_id))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize)]
struct SessionTokenClaims {
    user_id: i64,
    iat: i64,
    exp: i64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

