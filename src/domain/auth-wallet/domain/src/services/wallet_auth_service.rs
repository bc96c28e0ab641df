// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crypto_utils::InvalidEvmAddressError;
use internal_error::InternalError;
use thiserror::Error;
use tipmnee_accounts::UserID;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Passwordless login: the wallet signs a one-time challenge message
#[async_trait::async_trait]
pub trait WalletAuthService: Send + Sync {
    async fn issue_challenge(
        &self,
        wallet_address: &str,
    ) -> Result<WalletLoginChallenge, IssueChallengeError>;

    /// Consumes the wallet's challenge whatever the outcome, a signature is
    /// never accepted twice
    async fn login(
        &self,
        wallet_address: &str,
        signature_hex: &str,
    ) -> Result<WalletLoginResponse, WalletLoginError>;

    async fn cleanup_expired_challenges(&self) -> Result<(), InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletLoginChallenge {
    /// Lowercase `0x` form
    pub wallet_address: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletLoginResponse {
    pub session_token: String,
    pub user_id: UserID,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum IssueChallengeError {
    #[error(transparent)]
    InvalidAddress(#[from] InvalidEvmAddressError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum WalletLoginError {
    #[error(transparent)]
    InvalidAddress(#[from] InvalidEvmAddressError),

    #[error("No login challenge for this wallet, request a new challenge first")]
    ChallengeMissing,

    #[error("Login challenge expired, request a new challenge")]
    ChallengeExpired,

    #[error("Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    #[error("Signature does not match the wallet address")]
    SignerMismatch,

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
