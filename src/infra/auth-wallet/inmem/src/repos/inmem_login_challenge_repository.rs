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

use chrono::{DateTime, SubsecRound, Utc};
use crypto_utils::Address;
use tokio::sync::RwLock;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    challenges_by_wallet: HashMap<Address, LoginChallenge>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryLoginChallengeRepository {
    state: Arc<RwLock<State>>,
}

#[dill::component(pub)]
#[dill::interface(dyn LoginChallengeRepository)]
#[dill::scope(dill::Singleton)]
impl InMemoryLoginChallengeRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl LoginChallengeRepository for InMemoryLoginChallengeRepository {
    async fn set_challenge(&self, challenge: &LoginChallenge) -> Result<(), SetChallengeError> {
        let mut writable_state = self.state.write().await;

        writable_state
            .challenges_by_wallet
            .insert(challenge.wallet_address, challenge.clone());

        Ok(())
    }

    async fn take_challenge(
        &self,
        wallet_address: &Address,
    ) -> Result<LoginChallenge, TakeChallengeError> {
        let mut writable_state = self.state.write().await;

        writable_state
            .challenges_by_wallet
            .remove(wallet_address)
            .ok_or_else(|| {
                ChallengeNotFoundError {
                    wallet_address: *wallet_address,
                }
                .into()
            })
    }

    async fn cleanup_expired_challenges(
        &self,
        now: DateTime<Utc>,
    ) -> Result<u64, CleanupExpiredChallengesError> {
        let cutoff = now.trunc_subsecs(0);
        let mut writable_state = self.state.write().await;

        let before = writable_state.challenges_by_wallet.len();
        writable_state
            .challenges_by_wallet
            .retain(|_, challenge| challenge.expires_at >= cutoff);
        let after = writable_state.challenges_by_wallet.len();

        Ok((before - after) as u64)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
