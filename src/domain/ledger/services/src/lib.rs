// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod claim_signing_service_impl;
mod dependencies;
mod ledger_ingest_service_impl;
mod ledger_query_service_impl;

pub use claim_signing_service_impl::*;
pub use dependencies::*;
pub use ledger_ingest_service_impl::*;
pub use ledger_query_service_impl::*;
