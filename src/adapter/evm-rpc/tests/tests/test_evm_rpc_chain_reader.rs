// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crypto_utils::B256;
use tipmnee_adapter_evm_rpc::{EvmRpcChainReader, EvmRpcConfig};
use tipmnee_ledger::ChainReader;
use tokio::net::TcpListener;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unreachable_endpoint_is_internal_error() {
    // Grab a free port, then release it so nothing listens there
    let rpc_url = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let chain_reader = EvmRpcChainReader::new(Arc::new(EvmRpcConfig::new(
        rpc_url.parse().unwrap(),
    )));

    assert!(
        chain_reader
            .get_transaction(&B256::repeat_byte(1))
            .await
            .is_err()
    );
    assert!(chain_reader.get_block(1).await.is_err());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_silent_endpoint_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let rpc_url = format!("http://{}", listener.local_addr().unwrap());

    // Accepts connections and never answers
    let server = tokio::spawn(async move {
        let mut connections = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            connections.push(socket);
        }
    });

    let config = EvmRpcConfig {
        request_timeout: Duration::from_millis(200),
        ..EvmRpcConfig::new(rpc_url.parse().unwrap())
    };
    let chain_reader = EvmRpcChainReader::new(Arc::new(config));

    let started = Instant::now();
    let res = chain_reader
        .get_transaction_receipt(&B256::repeat_byte(1))
        .await;

    assert!(res.is_err());
    assert!(started.elapsed() < Duration::from_secs(5));

    server.abort();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
