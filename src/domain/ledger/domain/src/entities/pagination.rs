// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub const DEFAULT_LEDGER_PAGE_LIMIT: usize = 50;
pub const MAX_LEDGER_PAGE_LIMIT: usize = 200;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOpts {
    pub limit: usize,
    pub offset: usize,
}

impl PaginationOpts {
    /// Limits outside `1..=MAX_LEDGER_PAGE_LIMIT` fall back to the default
    pub fn new(maybe_limit: Option<usize>, maybe_offset: Option<usize>) -> Self {
        let limit = maybe_limit
            .filter(|limit| (1..=MAX_LEDGER_PAGE_LIMIT).contains(limit))
            .unwrap_or(DEFAULT_LEDGER_PAGE_LIMIT);

        Self {
            limit,
            offset: maybe_offset.unwrap_or_default(),
        }
    }
}

impl Default for PaginationOpts {
    fn default() -> Self {
        Self::new(None, None)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
