// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crypto_utils::B256;
use internal_error::{InternalError, ResultIntoInternal};
use tipmnee_accounts::{ChannelOwnershipService, EnsureChannelOwnerError, UserID};
use tipmnee_ledger::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct LedgerIngestServiceImpl {
    chain_reader: Arc<dyn ChainReader>,
    ledger_event_repo: Arc<dyn LedgerEventRepository>,
    channel_ownership_service: Arc<dyn ChannelOwnershipService>,
    escrow_config: Arc<EscrowConfig>,
}

#[dill::component(pub)]
#[dill::interface(dyn LedgerIngestService)]
impl LedgerIngestServiceImpl {
    pub fn new(
        chain_reader: Arc<dyn ChainReader>,
        ledger_event_repo: Arc<dyn LedgerEventRepository>,
        channel_ownership_service: Arc<dyn ChannelOwnershipService>,
        escrow_config: Arc<EscrowConfig>,
    ) -> Self {
        Self {
            chain_reader,
            ledger_event_repo,
            channel_ownership_service,
            escrow_config,
        }
    }

    fn validate_request<'a>(
        &self,
        tx_hash: &str,
        platform_channel_id: &'a str,
        expected_chain_id: Option<u64>,
    ) -> Result<(B256, &'a str), RecordLedgerEventsError> {
        let configured = self.escrow_config.chain_id;
        if let Some(requested) = expected_chain_id.filter(|requested| *requested != configured) {
            return Err(RecordLedgerEventsError::WrongChainId {
                requested,
                configured,
            });
        }

        let platform_channel_id = platform_channel_id.trim();
        if platform_channel_id.is_empty() {
            return Err(RecordLedgerEventsError::EmptyChannelId);
        }

        let tx_hash = parse_tx_hash(tx_hash)?;

        Ok((tx_hash, platform_channel_id))
    }

    /// Returns the receipt and block time of a successful transaction sent to
    /// the escrow contract
    async fn fetch_escrow_transaction(
        &self,
        tx_hash: &B256,
    ) -> Result<(ChainReceipt, DateTime<Utc>), RecordLedgerEventsError> {
        let Some(transaction) = self.chain_reader.get_transaction(tx_hash).await? else {
            return Err(RecordLedgerEventsError::TransactionNotFound { tx_hash: *tx_hash });
        };

        // Logs of other contracts could otherwise be relayed through a call
        if transaction.to != Some(self.escrow_config.escrow_contract) {
            tracing::warn!(to = ?transaction.to, "Transaction not sent to the escrow contract");
            return Err(RecordLedgerEventsError::NotSentToEscrow { tx_hash: *tx_hash });
        }

        let Some(receipt) = self.chain_reader.get_transaction_receipt(tx_hash).await? else {
            return Err(RecordLedgerEventsError::NotMined { tx_hash: *tx_hash });
        };

        if !receipt.succeeded {
            return Err(RecordLedgerEventsError::TransactionFailed { tx_hash: *tx_hash });
        }

        let block = self
            .chain_reader
            .get_block(receipt.block_number)
            .await?
            .ok_or_else(|| {
                InternalError::new(format!(
                    "Block {} of transaction {tx_hash:#x} not found",
                    receipt.block_number
                ))
            })?;

        Ok((receipt, block.timestamp))
    }

    async fn record_matching_events(
        &self,
        event_kind: EscrowEventKind,
        tx_hash: &B256,
        receipt: &ChainReceipt,
        block_time: DateTime<Utc>,
        platform_channel_id: &str,
        maybe_user_id: Option<UserID>,
    ) -> Result<RecordLedgerEventsResult, RecordLedgerEventsError> {
        let channel_id_hash = channel_id_hash(platform_channel_id);
        let mut result = RecordLedgerEventsResult::default();

        for log in receipt.logs.iter().filter(|log| {
            event_kind.matches(log, &self.escrow_config.escrow_contract, &channel_id_hash)
        }) {
            // Logs of the trusted contract are expected to be well-formed
            let data = event_kind.decode_data(&log.data).int_err()?;

            let event = LedgerEvent {
                platform: ESCROW_CHANNEL_PLATFORM,
                platform_channel_id: platform_channel_id.to_string(),
                user_id: maybe_user_id,
                event_type: event_kind.ledger_event_type(),
                amount_raw: data.amount_raw,
                message: data.message,
                tx_hash: *tx_hash,
                log_index: log.log_index,
                block_time,
            };

            match self.ledger_event_repo.insert_event(&event).await {
                Ok(()) => result.inserted += 1,
                Err(InsertLedgerEventError::Duplicate(_)) => {
                    tracing::debug!(log_index = log.log_index, "Ledger event already recorded");
                    result.duplicates += 1;
                }
                Err(InsertLedgerEventError::Internal(e)) => return Err(e.into()),
            }
        }

        if result.inserted == 0 && result.duplicates == 0 {
            return Err(RecordLedgerEventsError::NoMatchingEvent {
                tx_hash: *tx_hash,
                event_name: event_kind.to_string(),
                platform_channel_id: platform_channel_id.to_string(),
            });
        }

        tracing::info!(
            inserted = result.inserted,
            duplicates = result.duplicates,
            "Ledger events recorded"
        );

        Ok(result)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl LedgerIngestService for LedgerIngestServiceImpl {
    #[tracing::instrument(level = "info", skip_all, fields(%tx_hash, %platform_channel_id))]
    async fn record_deposit(
        &self,
        tx_hash: &str,
        platform_channel_id: &str,
        expected_chain_id: Option<u64>,
    ) -> Result<RecordLedgerEventsResult, RecordLedgerEventsError> {
        let (tx_hash, platform_channel_id) =
            self.validate_request(tx_hash, platform_channel_id, expected_chain_id)?;

        let (receipt, block_time) = self.fetch_escrow_transaction(&tx_hash).await?;

        // Unverified channels collect tips without an owner until a backfill
        let maybe_user_id = self
            .channel_ownership_service
            .find_verified_owner(ESCROW_CHANNEL_PLATFORM, platform_channel_id)
            .await?;

        self.record_matching_events(
            EscrowEventKind::Tipped,
            &tx_hash,
            &receipt,
            block_time,
            platform_channel_id,
            maybe_user_id,
        )
        .await
    }

    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(%user_id, %tx_hash, %platform_channel_id)
    )]
    async fn record_withdrawal(
        &self,
        user_id: UserID,
        tx_hash: &str,
        platform_channel_id: &str,
        expected_chain_id: Option<u64>,
    ) -> Result<RecordLedgerEventsResult, RecordLedgerEventsError> {
        let (tx_hash, platform_channel_id) =
            self.validate_request(tx_hash, platform_channel_id, expected_chain_id)?;

        self.channel_ownership_service
            .ensure_verified_owner(user_id, ESCROW_CHANNEL_PLATFORM, platform_channel_id)
            .await
            .map_err(|e| match e {
                EnsureChannelOwnerError::Ownership(e) => RecordLedgerEventsError::Ownership(e),
                EnsureChannelOwnerError::Internal(e) => RecordLedgerEventsError::Internal(e),
            })?;

        let (receipt, block_time) = self.fetch_escrow_transaction(&tx_hash).await?;

        self.record_matching_events(
            EscrowEventKind::Withdrawn,
            &tx_hash,
            &receipt,
            block_time,
            platform_channel_id,
            Some(user_id),
        )
        .await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
