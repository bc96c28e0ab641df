// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use rand::Rng;
use rand::distributions::Alphanumeric;
use secrecy::SecretString;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const ENV_VAR_JWT_SECRET: &str = "JWT_SECRET";

const RANDOM_JWT_SECRET_LEN: usize = 64;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct JwtAuthenticationConfig {
    pub jwt_secret: SecretString,
    pub token_ttl: chrono::Duration,
}

impl JwtAuthenticationConfig {
    pub fn new(maybe_jwt_secret: Option<String>) -> Self {
        let jwt_secret = maybe_jwt_secret
            .filter(|secret| !secret.is_empty())
            .unwrap_or_else(random_jwt_secret);

        Self {
            jwt_secret: SecretString::from(jwt_secret),
            token_ttl: chrono::Duration::hours(24),
        }
    }

    /// A missing secret is replaced with a random one, so tokens do not
    /// survive a restart
    pub fn load_from_env() -> Self {
        Self::new(std::env::var(ENV_VAR_JWT_SECRET).ok())
    }
}

impl Default for JwtAuthenticationConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

fn random_jwt_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_JWT_SECRET_LEN)
        .map(char::from)
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
