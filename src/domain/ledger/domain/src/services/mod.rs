// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod chain_reader;
mod claim_signing_config;
mod claim_signing_service;
mod config_error;
mod escrow_config;
mod ledger_ingest_service;
mod ledger_query_service;

pub use chain_reader::*;
pub use claim_signing_config::*;
pub use claim_signing_service::*;
pub use config_error::*;
pub use escrow_config::*;
pub use ledger_ingest_service::*;
pub use ledger_query_service::*;
