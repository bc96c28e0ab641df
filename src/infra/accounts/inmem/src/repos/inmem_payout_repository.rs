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

use tokio::sync::RwLock;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    payouts: HashMap<(UserID, PayoutChain), PayoutAddress>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryPayoutRepository {
    state: Arc<RwLock<State>>,
}

#[dill::component(pub)]
#[dill::interface(dyn PayoutRepository)]
#[dill::scope(dill::Singleton)]
impl InMemoryPayoutRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl PayoutRepository for InMemoryPayoutRepository {
    async fn set_payout_address(&self, payout: &PayoutAddress) -> Result<(), SetPayoutAddressError> {
        let mut writable_state = self.state.write().await;

        writable_state
            .payouts
            .insert((payout.user_id, payout.chain), payout.clone());

        Ok(())
    }

    async fn find_payout_address(
        &self,
        user_id: UserID,
        chain: PayoutChain,
    ) -> Result<Option<PayoutAddress>, FindPayoutAddressError> {
        let readable_state = self.state.read().await;

        Ok(readable_state.payouts.get(&(user_id, chain)).cloned())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
