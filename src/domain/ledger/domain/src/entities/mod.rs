// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod claim;
mod earnings_summary;
mod escrow_events;
mod ledger_event;
mod pagination;
mod tx_hash;

pub use claim::*;
pub use earnings_summary::*;
pub use escrow_events::*;
pub use ledger_event::*;
pub use pagination::*;
pub use tx_hash::*;
