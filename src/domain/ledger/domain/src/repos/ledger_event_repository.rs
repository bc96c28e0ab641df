// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crypto_utils::B256;
use internal_error::InternalError;
use thiserror::Error;
use tipmnee_accounts::{Platform, UserID};

use crate::{EarningsSummary, LedgerEvent, PaginationOpts};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait LedgerEventRepository: Send + Sync {
    /// Fails with `Duplicate` when an event with the same
    /// `(tx_hash, log_index)` is already stored, including when a concurrent
    /// insert wins the race
    async fn insert_event(&self, event: &LedgerEvent) -> Result<(), InsertLedgerEventError>;

    /// Attributes still unowned events of a channel to its verified owner.
    /// Returns the number of updated events.
    async fn backfill_user_for_channel(
        &self,
        platform: Platform,
        platform_channel_id: &str,
        user_id: UserID,
    ) -> Result<u64, BackfillLedgerUserError>;

    /// Newest first, ties broken by `(tx_hash, log_index)`
    async fn list_tips_for_user(
        &self,
        user_id: UserID,
        pagination: &PaginationOpts,
    ) -> Result<Vec<LedgerEvent>, ListLedgerEventsError>;

    async fn get_earnings_summary_for_user(
        &self,
        user_id: UserID,
    ) -> Result<EarningsSummary, GetEarningsSummaryError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum InsertLedgerEventError {
    #[error(transparent)]
    Duplicate(InsertLedgerEventErrorDuplicate),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Ledger event for log {tx_hash:#x}:{log_index} already exists")]
pub struct InsertLedgerEventErrorDuplicate {
    pub tx_hash: B256,
    pub log_index: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum BackfillLedgerUserError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ListLedgerEventsError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetEarningsSummaryError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
