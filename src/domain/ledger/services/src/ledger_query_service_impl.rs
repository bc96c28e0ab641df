// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::{InternalError, ResultIntoInternal};
use tipmnee_accounts::UserID;
use tipmnee_ledger::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct LedgerQueryServiceImpl {
    ledger_event_repo: Arc<dyn LedgerEventRepository>,
}

#[dill::component(pub)]
#[dill::interface(dyn LedgerQueryService)]
impl LedgerQueryServiceImpl {
    pub fn new(ledger_event_repo: Arc<dyn LedgerEventRepository>) -> Self {
        Self { ledger_event_repo }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl LedgerQueryService for LedgerQueryServiceImpl {
    async fn earnings_summary(&self, user_id: UserID) -> Result<EarningsSummary, InternalError> {
        self.ledger_event_repo
            .get_earnings_summary_for_user(user_id)
            .await
            .int_err()
    }

    async fn list_tips(
        &self,
        user_id: UserID,
        pagination: PaginationOpts,
    ) -> Result<Vec<LedgerEvent>, InternalError> {
        self.ledger_event_repo
            .list_tips_for_user(user_id, &pagination)
            .await
            .int_err()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
