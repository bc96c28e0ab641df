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
use crypto_utils::{B256, U256};
use internal_error::{ErrorIntoInternal, InternalError, ResultIntoInternal};
use sqlx::PgPool;
use tipmnee_accounts::{Platform, UserID};

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct PostgresLedgerEventRepository {
    pool: Arc<PgPool>,
}

#[dill::component(pub)]
#[dill::interface(dyn LedgerEventRepository)]
impl PostgresLedgerEventRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl LedgerEventRepository for PostgresLedgerEventRepository {
    async fn insert_event(&self, event: &LedgerEvent) -> Result<(), InsertLedgerEventError> {
        // Amounts travel as decimal text, NUMERIC(78, 0) holds any uint256
        let insert_result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO ledger_events(platform, platform_channel_id, user_id, event_type,
                                      amount_raw, message, tx_hash, log_index, block_time)
            VALUES ($1, $2, $3, $4, $5::NUMERIC, $6, $7, $8, $9)
            ON CONFLICT (tx_hash, log_index) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(event.platform.as_ref())
        .bind(&event.platform_channel_id)
        .bind(event.user_id.map(UserID::as_i64))
        .bind(event.event_type.as_ref())
        .bind(event.amount_raw.to_string())
        .bind(&event.message)
        .bind(tx_hash_to_db(&event.tx_hash))
        .bind(i64::try_from(event.log_index).int_err()?)
        .bind(event.block_time)
        .fetch_optional(self.pool.as_ref())
        .await;

        let maybe_id = match insert_result {
            Ok(maybe_id) => maybe_id,
            // Conflicts on the natural key are normally absorbed by the statement itself
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => None,
            Err(e) => return Err(e.int_err().into()),
        };

        if maybe_id.is_none() {
            return Err(InsertLedgerEventError::Duplicate(
                InsertLedgerEventErrorDuplicate {
                    tx_hash: event.tx_hash,
                    log_index: event.log_index,
                },
            ));
        }

        Ok(())
    }

    async fn backfill_user_for_channel(
        &self,
        platform: Platform,
        platform_channel_id: &str,
        user_id: UserID,
    ) -> Result<u64, BackfillLedgerUserError> {
        let update_result = sqlx::query(
            r#"
            UPDATE ledger_events
            SET user_id = $3
            WHERE platform = $1
              AND platform_channel_id = $2
              AND user_id IS NULL
            "#,
        )
        .bind(platform.as_ref())
        .bind(platform_channel_id)
        .bind(user_id.as_i64())
        .execute(self.pool.as_ref())
        .await
        .int_err()?;

        Ok(update_result.rows_affected())
    }

    async fn list_tips_for_user(
        &self,
        user_id: UserID,
        pagination: &PaginationOpts,
    ) -> Result<Vec<LedgerEvent>, ListLedgerEventsError> {
        let rows = sqlx::query_as::<_, LedgerEventRowModel>(
            r#"
            SELECT platform,
                   platform_channel_id,
                   user_id,
                   event_type,
                   amount_raw::TEXT AS amount_raw,
                   message,
                   tx_hash,
                   log_index,
                   block_time
            FROM ledger_events
            WHERE user_id = $1
              AND event_type = $2
            ORDER BY block_time DESC, tx_hash, log_index
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id.as_i64())
        .bind(LedgerEventType::Tip.as_ref())
        .bind(i64::try_from(pagination.limit).int_err()?)
        .bind(i64::try_from(pagination.offset).int_err()?)
        .fetch_all(self.pool.as_ref())
        .await
        .int_err()?;

        let events = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, InternalError>>()?;

        Ok(events)
    }

    async fn get_earnings_summary_for_user(
        &self,
        user_id: UserID,
    ) -> Result<EarningsSummary, GetEarningsSummaryError> {
        let row = sqlx::query_as::<_, EarningsSummaryRowModel>(
            r#"
            SELECT COUNT(*) FILTER (WHERE event_type = $2) AS tips_count,
                   COALESCE(SUM(amount_raw) FILTER (WHERE event_type = $2), 0)::TEXT
                       AS total_tipped_raw,
                   COALESCE(SUM(amount_raw) FILTER (WHERE event_type = $3), 0)::TEXT
                       AS total_withdrawn_raw
            FROM ledger_events
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .bind(LedgerEventType::Tip.as_ref())
        .bind(LedgerEventType::Withdraw.as_ref())
        .fetch_one(self.pool.as_ref())
        .await
        .int_err()?;

        Ok(row.try_into()?)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn tx_hash_to_db(tx_hash: &B256) -> String {
    format!("{tx_hash:#x}")
}

fn amount_from_db(value: &str) -> Result<U256, InternalError> {
    value.parse::<U256>().int_err()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(sqlx::FromRow)]
struct LedgerEventRowModel {
    platform: String,
    platform_channel_id: String,
    user_id: Option<i64>,
    event_type: String,
    amount_raw: String,
    message: Option<String>,
    tx_hash: String,
    log_index: i64,
    block_time: DateTime<Utc>,
}

impl TryFrom<LedgerEventRowModel> for LedgerEvent {
    type Error = InternalError;

    fn try_from(row: LedgerEventRowModel) -> Result<Self, Self::Error> {
        Ok(LedgerEvent {
            platform: row.platform.parse().int_err()?,
            platform_channel_id: row.platform_channel_id,
            user_id: row.user_id.map(UserID::new),
            event_type: row.event_type.parse().int_err()?,
            amount_raw: amount_from_db(&row.amount_raw)?,
            message: row.message,
            tx_hash: parse_tx_hash(&row.tx_hash).int_err()?,
            log_index: u64::try_from(row.log_index).int_err()?,
            block_time: row.block_time,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EarningsSummaryRowModel {
    tips_count: i64,
    total_tipped_raw: String,
    total_withdrawn_raw: String,
}

impl TryFrom<EarningsSummaryRowModel> for EarningsSummary {
    type Error = InternalError;

    fn try_from(row: EarningsSummaryRowModel) -> Result<Self, Self::Error> {
        Ok(EarningsSummary::new(
            u64::try_from(row.tips_count).int_err()?,
            amount_from_db(&row.total_tipped_raw)?,
            amount_from_db(&row.total_withdrawn_raw)?,
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
