// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use crypto_utils::Address;
use internal_error::InternalError;
use thiserror::Error;

use crate::LoginChallenge;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait LoginChallengeRepository: Send + Sync {
    /// Upsert: replaces any earlier challenge for the same wallet
    async fn set_challenge(&self, challenge: &LoginChallenge) -> Result<(), SetChallengeError>;

    /// Atomically reads and deletes the challenge of a wallet. Out of
    /// concurrent callers, at most one receives the challenge.
    async fn take_challenge(
        &self,
        wallet_address: &Address,
    ) -> Result<LoginChallenge, TakeChallengeError>;

    /// Deletes challenges that expired before the whole second `now` falls
    /// in, returns the number deleted. A challenge stays during its expiry
    /// second, matching [`LoginChallenge::is_expired`].
    async fn cleanup_expired_challenges(
        &self,
        now: DateTime<Utc>,
    ) -> Result<u64, CleanupExpiredChallengesError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SetChallengeError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum TakeChallengeError {
    #[error(transparent)]
    NotFound(#[from] ChallengeNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for TakeChallengeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("No login challenge for wallet {wallet_address:#x}")]
pub struct ChallengeNotFoundError {
    pub wallet_address: Address,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CleanupExpiredChallengesError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
