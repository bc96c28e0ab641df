// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crypto_utils::{Address, parse_evm_address};

use crate::{ConfigError, read_env_var};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const ENV_VAR_CHAIN_ID: &str = "CHAIN_ID";
pub const ENV_VAR_ESCROW_CONTRACT: &str = "ESCROW_CONTRACT";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Chain and contract that ledger ingestion and claims are bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowConfig {
    pub chain_id: u64,
    pub escrow_contract: Address,
}

impl EscrowConfig {
    pub fn new(chain_id: u64, escrow_contract: Address) -> Self {
        Self {
            chain_id,
            escrow_contract,
        }
    }

    pub fn load_from_env() -> Result<Self, ConfigError> {
        let chain_id = read_env_var(ENV_VAR_CHAIN_ID)?
            .parse()
            .map_err(|e| ConfigError::invalid(ENV_VAR_CHAIN_ID, e))?;

        let escrow_contract = parse_evm_address(&read_env_var(ENV_VAR_ESCROW_CONTRACT)?)
            .map_err(|e| ConfigError::invalid(ENV_VAR_ESCROW_CONTRACT, e))?;

        Ok(Self::new(chain_id, escrow_contract))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
