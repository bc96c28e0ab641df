// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use crypto_utils::{Address, B256};
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Read access to the chain the escrow contract lives on. Implementations
/// must be safe for concurrent use and must not block the caller beyond
/// their own request timeout.
#[async_trait::async_trait]
pub trait ChainReader: Send + Sync {
    async fn get_transaction(
        &self,
        tx_hash: &B256,
    ) -> Result<Option<ChainTransaction>, InternalError>;

    /// `None` while the transaction is not mined
    async fn get_transaction_receipt(
        &self,
        tx_hash: &B256,
    ) -> Result<Option<ChainReceipt>, InternalError>;

    async fn get_block(&self, block_number: u64) -> Result<Option<ChainBlock>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTransaction {
    pub hash: B256,
    /// `None` for contract creation
    pub to: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReceipt {
    pub tx_hash: B256,
    pub block_number: u64,
    pub succeeded: bool,
    pub logs: Vec<ChainLog>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Vec<u8>,
    /// Position of the log within its block
    pub log_index: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBlock {
    pub number: u64,
    pub timestamp: DateTime<Utc>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
