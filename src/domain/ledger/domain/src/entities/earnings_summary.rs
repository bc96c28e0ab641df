// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crypto_utils::U256;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EarningsSummary {
    pub tips_count: u64,
    pub total_tipped_raw: U256,
    pub total_withdrawn_raw: U256,
    /// Tipped minus withdrawn, never below zero
    pub available_raw: U256,
}

impl EarningsSummary {
    pub fn new(tips_count: u64, total_tipped_raw: U256, total_withdrawn_raw: U256) -> Self {
        Self {
            tips_count,
            total_tipped_raw,
            total_withdrawn_raw,
            available_raw: total_tipped_raw.saturating_sub(total_withdrawn_raw),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
