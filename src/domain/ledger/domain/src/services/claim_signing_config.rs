// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use secrecy::SecretString;

use crate::{ConfigError, read_env_var};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const ENV_VAR_VERIFIER_PRIVATE_KEY: &str = "VERIFIER_PRIVATE_KEY";

pub const DEFAULT_CLAIM_DOMAIN_NAME: &str = "TipMNEE";
pub const DEFAULT_CLAIM_DOMAIN_VERSION: &str = "1";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct ClaimSigningConfig {
    /// Hex secp256k1 key, its address is the verifier trusted by the escrow
    pub verifier_private_key: SecretString,
    /// EIP-712 domain `name`, must match the contract
    pub domain_name: String,
    /// EIP-712 domain `version`, must match the contract
    pub domain_version: String,
    pub claim_ttl: chrono::Duration,
}

impl ClaimSigningConfig {
    pub fn new(verifier_private_key: SecretString) -> Self {
        Self {
            verifier_private_key,
            domain_name: DEFAULT_CLAIM_DOMAIN_NAME.to_string(),
            domain_version: DEFAULT_CLAIM_DOMAIN_VERSION.to_string(),
            claim_ttl: chrono::Duration::minutes(10),
        }
    }

    pub fn load_from_env() -> Result<Self, ConfigError> {
        let verifier_private_key = read_env_var(ENV_VAR_VERIFIER_PRIVATE_KEY)?;

        Ok(Self::new(SecretString::from(verifier_private_key)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
