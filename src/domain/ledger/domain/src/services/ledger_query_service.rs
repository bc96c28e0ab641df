// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use tipmnee_accounts::UserID;

use crate::{EarningsSummary, LedgerEvent, PaginationOpts};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait LedgerQueryService: Send + Sync {
    async fn earnings_summary(&self, user_id: UserID) -> Result<EarningsSummary, InternalError>;

    async fn list_tips(
        &self,
        user_id: UserID,
        pagination: PaginationOpts,
    ) -> Result<Vec<LedgerEvent>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
