// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use alloy::consensus::Transaction as _;
use alloy::network::Ethereum;
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::Log;
use chrono::{DateTime, Utc};
use crypto_utils::B256;
use internal_error::{ErrorIntoInternal, InternalError};
use tipmnee_ledger::{ChainBlock, ChainLog, ChainReader, ChainReceipt, ChainTransaction};

use crate::EvmRpcConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct EvmRpcChainReader {
    provider: RootProvider<Ethereum>,
    request_timeout: Duration,
}

#[dill::component(pub)]
#[dill::interface(dyn ChainReader)]
#[dill::scope(dill::Singleton)]
impl EvmRpcChainReader {
    pub fn new(config: Arc<EvmRpcConfig>) -> Self {
        Self {
            provider: RootProvider::new_http(config.rpc_url.clone()),
            request_timeout: config.request_timeout,
        }
    }

    async fn call<T, E, F>(&self, method: &'static str, request: F) -> Result<T, InternalError>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        match tokio::time::timeout(self.request_timeout, request.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC call failed");
                Err(e.int_err())
            }
            Err(_) => {
                tracing::warn!(method, timeout = ?self.request_timeout, "RPC call timed out");
                Err(InternalError::new(format!(
                    "RPC call {method} timed out after {:?}",
                    self.request_timeout
                )))
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ChainReader for EvmRpcChainReader {
    async fn get_transaction(
        &self,
        tx_hash: &B256,
    ) -> Result<Option<ChainTransaction>, InternalError> {
        let maybe_tx = self
            .call(
                "eth_getTransactionByHash",
                self.provider.get_transaction_by_hash(*tx_hash),
            )
            .await?;

        Ok(maybe_tx.map(|tx| ChainTransaction {
            hash: *tx_hash,
            to: tx.to(),
        }))
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: &B256,
    ) -> Result<Option<ChainReceipt>, InternalError> {
        let maybe_receipt = self
            .call(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(*tx_hash),
            )
            .await?;

        let Some(receipt) = maybe_receipt else {
            return Ok(None);
        };

        // Some nodes return receipts of pending transactions without a block
        let Some(block_number) = receipt.block_number else {
            return Ok(None);
        };

        let logs = receipt
            .inner
            .logs()
            .iter()
            .map(chain_log)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(ChainReceipt {
            tx_hash: *tx_hash,
            block_number,
            succeeded: receipt.status(),
            logs,
        }))
    }

    async fn get_block(&self, block_number: u64) -> Result<Option<ChainBlock>, InternalError> {
        let maybe_block = self
            .call(
                "eth_getBlockByNumber",
                self.provider.get_block_by_number(block_number.into()),
            )
            .await?;

        maybe_block
            .map(|block| {
                Ok(ChainBlock {
                    number: block_number,
                    timestamp: block_time(block.header.timestamp)?,
                })
            })
            .transpose()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn chain_log(log: &Log) -> Result<ChainLog, InternalError> {
    let log_index = log
        .log_index
        .ok_or_else(|| InternalError::new("Receipt log has no index"))?;

    Ok(ChainLog {
        address: log.address(),
        topics: log.topics().to_vec(),
        data: log.data().data.to_vec(),
        log_index,
    })
}

fn block_time(timestamp: u64) -> Result<DateTime<Utc>, InternalError> {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| InternalError::new(format!("Block timestamp {timestamp} is out of range")))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
