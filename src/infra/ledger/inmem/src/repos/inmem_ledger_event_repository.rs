// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::Arc;

use crypto_utils::{B256, U256};
use tipmnee_accounts::{Platform, UserID};
use tokio::sync::RwLock;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    events_by_log: HashMap<(B256, u64), LedgerEvent>,
}

impl State {
    fn user_events(
        &self,
        user_id: UserID,
        event_type: LedgerEventType,
    ) -> impl Iterator<Item = &LedgerEvent> {
        self.events_by_log.values().filter(move |event| {
            event.user_id == Some(user_id) && event.event_type == event_type
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryLedgerEventRepository {
    state: Arc<RwLock<State>>,
}

#[dill::component(pub)]
#[dill::interface(dyn LedgerEventRepository)]
#[dill::scope(dill::Singleton)]
impl InMemoryLedgerEventRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl LedgerEventRepository for InMemoryLedgerEventRepository {
    async fn insert_event(&self, event: &LedgerEvent) -> Result<(), InsertLedgerEventError> {
        let mut writable_state = self.state.write().await;

        let natural_key = event.natural_key();
        if writable_state.events_by_log.contains_key(&natural_key) {
            return Err(InsertLedgerEventError::Duplicate(
                InsertLedgerEventErrorDuplicate {
                    tx_hash: event.tx_hash,
                    log_index: event.log_index,
                },
            ));
        }

        writable_state
            .events_by_log
            .insert(natural_key, event.clone());

        Ok(())
    }

    async fn backfill_user_for_channel(
        &self,
        platform: Platform,
        platform_channel_id: &str,
        user_id: UserID,
    ) -> Result<u64, BackfillLedgerUserError> {
        let mut writable_state = self.state.write().await;

        let mut updated = 0;
        for event in writable_state.events_by_log.values_mut().filter(|event| {
            event.user_id.is_none()
                && event.platform == platform
                && event.platform_channel_id == platform_channel_id
        }) {
            event.user_id = Some(user_id);
            updated += 1;
        }

        Ok(updated)
    }

    async fn list_tips_for_user(
        &self,
        user_id: UserID,
        pagination: &PaginationOpts,
    ) -> Result<Vec<LedgerEvent>, ListLedgerEventsError> {
        let readable_state = self.state.read().await;

        let mut tips: Vec<_> = readable_state
            .user_events(user_id, LedgerEventType::Tip)
            .collect();

        tips.sort_by(|a, b| {
            b.block_time
                .cmp(&a.block_time)
                .then_with(|| a.natural_key().cmp(&b.natural_key()))
        });

        Ok(tips
            .into_iter()
            .skip(pagination.offset)
            .take(pagination.limit)
            .cloned()
            .collect())
    }

    async fn get_earnings_summary_for_user(
        &self,
        user_id: UserID,
    ) -> Result<EarningsSummary, GetEarningsSummaryError> {
        let readable_state = self.state.read().await;

        let (tips_count, total_tipped_raw) = readable_state
            .user_events(user_id, LedgerEventType::Tip)
            .fold((0, U256::ZERO), |(count, total), event| {
                (count + 1, total.saturating_add(event.amount_raw))
            });

        let total_withdrawn_raw = readable_state
            .user_events(user_id, LedgerEventType::Withdraw)
            .fold(U256::ZERO, |total, event| {
                total.saturating_add(event.amount_raw)
            });

        Ok(EarningsSummary::new(
            tips_count,
            total_tipped_raw,
            total_withdrawn_raw,
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
