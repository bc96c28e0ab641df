// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use tipmnee_ledger::{ConfigError, read_optional_env_var};
use url::Url;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const ENV_VAR_SEPOLIA_RPC_URL: &str = "SEPOLIA_RPC_URL";
pub const ENV_VAR_RPC_URL: &str = "RPC_URL";

pub const DEFAULT_RPC_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmRpcConfig {
    pub rpc_url: Url,
    /// Upper bound for a single JSON-RPC call
    pub request_timeout: Duration,
}

impl EvmRpcConfig {
    pub fn new(rpc_url: Url) -> Self {
        Self {
            rpc_url,
            request_timeout: DEFAULT_RPC_REQUEST_TIMEOUT,
        }
    }

    pub fn parse(name: &'static str, rpc_url: &str) -> Result<Self, ConfigError> {
        let rpc_url = Url::parse(rpc_url).map_err(|e| ConfigError::invalid(name, e))?;

        if !matches!(rpc_url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(name, "expected an http(s) URL"));
        }

        Ok(Self::new(rpc_url))
    }

    /// `SEPOLIA_RPC_URL` takes precedence over `RPC_URL`
    pub fn load_from_env() -> Result<Self, ConfigError> {
        for name in [ENV_VAR_SEPOLIA_RPC_URL, ENV_VAR_RPC_URL] {
            if let Some(rpc_url) = read_optional_env_var(name)? {
                return Self::parse(name, &rpc_url);
            }
        }

        Err(ConfigError::Missing {
            name: ENV_VAR_SEPOLIA_RPC_URL,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
