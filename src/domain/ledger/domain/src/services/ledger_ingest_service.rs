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
use tipmnee_accounts::{ChannelOwnershipError, UserID};

use crate::InvalidTxHashError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Mirrors escrow contract events into the ledger.
///
/// Submitting the same transaction again is safe: already recorded logs are
/// reported as duplicates instead of failing.
#[async_trait::async_trait]
pub trait LedgerIngestService: Send + Sync {
    /// Records `Tipped` events of the channel. Needs no caller identity: the
    /// transaction is validated against the chain, not trusted.
    async fn record_deposit(
        &self,
        tx_hash: &str,
        platform_channel_id: &str,
        expected_chain_id: Option<u64>,
    ) -> Result<RecordLedgerEventsResult, RecordLedgerEventsError>;

    /// Records `Withdrawn` events of the channel on behalf of its verified
    /// owner
    async fn record_withdrawal(
        &self,
        user_id: UserID,
        tx_hash: &str,
        platform_channel_id: &str,
        expected_chain_id: Option<u64>,
    ) -> Result<RecordLedgerEventsResult, RecordLedgerEventsError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordLedgerEventsResult {
    pub inserted: usize,
    pub duplicates: usize,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum RecordLedgerEventsError {
    #[error("Wrong chain id {requested}, expected {configured}")]
    WrongChainId { requested: u64, configured: u64 },

    #[error(transparent)]
    InvalidTxHash(#[from] InvalidTxHashError),

    #[error("Channel id is required")]
    EmptyChannelId,

    #[error(transparent)]
    Ownership(#[from] ChannelOwnershipError),

    #[error("Transaction {tx_hash:#x} not found")]
    TransactionNotFound { tx_hash: B256 },

    #[error("Transaction {tx_hash:#x} was not sent to the escrow contract")]
    NotSentToEscrow { tx_hash: B256 },

    #[error("Transaction {tx_hash:#x} is not mined yet")]
    NotMined { tx_hash: B256 },

    #[error("Transaction {tx_hash:#x} failed")]
    TransactionFailed { tx_hash: B256 },

    #[error("No matching {event_name} event for channel {platform_channel_id} in transaction {tx_hash:#x}")]
    NoMatchingEvent {
        tx_hash: B256,
        event_name: String,
        platform_channel_id: String,
    },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
