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
    last_user_id: i64,
    identities: HashMap<(IdentityProvider, String), Identity>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryIdentityRepository {
    state: Arc<RwLock<State>>,
}

#[dill::component(pub)]
#[dill::interface(dyn IdentityRepository)]
#[dill::scope(dill::Singleton)]
impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_identity(
        &self,
        provider: IdentityProvider,
        provider_user_id: &str,
    ) -> Result<Option<Identity>, FindIdentityError> {
        let readable_state = self.state.read().await;

        Ok(readable_state
            .identities
            .get(&(provider, provider_user_id.to_string()))
            .cloned())
    }

    async fn create_user_with_identity(
        &self,
        provider: IdentityProvider,
        provider_user_id: &str,
    ) -> Result<Identity, CreateIdentityError> {
        let mut writable_state = self.state.write().await;

        let key = (provider, provider_user_id.to_string());
        if writable_state.identities.contains_key(&key) {
            return Err(CreateIdentityError::Duplicate(
                CreateIdentityErrorDuplicate {
                    provider,
                    provider_user_id: provider_user_id.to_string(),
                },
            ));
        }

        writable_state.last_user_id += 1;

        let identity = Identity {
            user_id: UserID::new(writable_state.last_user_id),
            provider,
            provider_user_id: provider_user_id.to_string(),
        };
        writable_state.identities.insert(key, identity.clone());

        Ok(identity)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
