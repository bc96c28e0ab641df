// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use crypto_utils::{
    Address,
    decode_signature_hex,
    hash_personal_message,
    parse_evm_address,
    recover_address,
    to_lowercase_hex,
};
use internal_error::{InternalError, ResultIntoInternal};
use time_source::SystemTimeSource;
use tipmnee_accounts::{
    CreateIdentityError,
    IdentityProvider,
    IdentityRepository,
    SessionTokenService,
    UserID,
};
use tipmnee_auth_wallet::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct WalletAuthServiceImpl {
    challenge_repo: Arc<dyn LoginChallengeRepository>,
    identity_repo: Arc<dyn IdentityRepository>,
    session_token_service: Arc<dyn SessionTokenService>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<WalletAuthConfig>,
}

#[dill::component(pub)]
#[dill::interface(dyn WalletAuthService)]
impl WalletAuthServiceImpl {
    pub fn new(
        challenge_repo: Arc<dyn LoginChallengeRepository>,
        identity_repo: Arc<dyn IdentityRepository>,
        session_token_service: Arc<dyn SessionTokenService>,
        time_source: Arc<dyn SystemTimeSource>,
        config: Arc<WalletAuthConfig>,
    ) -> Self {
        Self {
            challenge_repo,
            identity_repo,
            session_token_service,
            time_source,
            config,
        }
    }

    /// Returns the user bound to the wallet, creating one on first login.
    /// Concurrent first logins converge: the loser of the creation race
    /// observes a duplicate and re-reads the winner's identity.
    async fn resolve_wallet_user(&self, wallet_address: &Address) -> Result<UserID, InternalError> {
        let provider_user_id = to_lowercase_hex(wallet_address);

        if let Some(identity) = self
            .identity_repo
            .find_identity(IdentityProvider::Wallet, &provider_user_id)
            .await
            .int_err()?
        {
            return Ok(identity.user_id);
        }

        match self
            .identity_repo
            .create_user_with_identity(IdentityProvider::Wallet, &provider_user_id)
            .await
        {
            Ok(identity) => {
                tracing::info!(user_id = %identity.user_id, "Created user for a new wallet");
                Ok(identity.user_id)
            }
            Err(CreateIdentityError::Duplicate(_)) => {
                tracing::debug!("Wallet identity created concurrently, re-reading");

                match self
                    .identity_repo
                    .find_identity(IdentityProvider::Wallet, &provider_user_id)
                    .await
                    .int_err()?
                {
                    Some(identity) => Ok(identity.user_id),
                    None => InternalError::bail(format!(
                        "Wallet identity {provider_user_id} reported as duplicate but not found"
                    )),
                }
            }
            Err(CreateIdentityError::Internal(e)) => Err(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl WalletAuthService for WalletAuthServiceImpl {
    #[tracing::instrument(level = "info", skip_all, fields(%wallet_address))]
    async fn issue_challenge(
        &self,
        wallet_address: &str,
    ) -> Result<WalletLoginChallenge, IssueChallengeError> {
        let wallet_address = parse_evm_address(wallet_address)?;

        let challenge = LoginChallenge::new(
            &self.config.app_name,
            wallet_address,
            generate_login_nonce(),
            self.time_source.now() + self.config.challenge_ttl,
        );

        self.challenge_repo.set_challenge(&challenge).await.int_err()?;

        Ok(WalletLoginChallenge {
            wallet_address: to_lowercase_hex(&challenge.wallet_address),
            message: challenge.message,
        })
    }

    #[tracing::instrument(level = "info", skip_all, fields(%wallet_address))]
    async fn login(
        &self,
        wallet_address: &str,
        signature_hex: &str,
    ) -> Result<WalletLoginResponse, WalletLoginError> {
        let wallet_address = parse_evm_address(wallet_address)?;

        // Taken, not read: every outcome below consumes the challenge
        let challenge = match self.challenge_repo.take_challenge(&wallet_address).await {
            Ok(challenge) => challenge,
            Err(TakeChallengeError::NotFound(_)) => {
                tracing::debug!("Login attempt without a challenge");
                return Err(WalletLoginError::ChallengeMissing);
            }
            Err(TakeChallengeError::Internal(e)) => return Err(e.into()),
        };

        if challenge.is_expired(self.time_source.now()) {
            tracing::debug!(expires_at = %challenge.expires_at, "Login challenge expired");
            return Err(WalletLoginError::ChallengeExpired);
        }

        let recovered_address = decode_signature_hex(signature_hex)
            .and_then(|signature| {
                recover_address(
                    &hash_personal_message(challenge.message.as_bytes()),
                    &signature,
                )
            })
            .map_err(|e| WalletLoginError::InvalidSignature {
                reason: e.to_string(),
            })?;

        if recovered_address != challenge.wallet_address {
            tracing::warn!(
                recovered_address = %to_lowercase_hex(&recovered_address),
                "Login signature made by another wallet"
            );
            return Err(WalletLoginError::SignerMismatch);
        }

        let user_id = self.resolve_wallet_user(&challenge.wallet_address).await?;
        let session_token = self.session_token_service.issue_session_token(user_id)?;

        tracing::info!(%user_id, "Wallet login succeeded");

        Ok(WalletLoginResponse {
            session_token,
            user_id,
        })
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn cleanup_expired_challenges(&self) -> Result<(), InternalError> {
        let now = self.time_source.now();

        let deleted = self
            .challenge_repo
            .cleanup_expired_challenges(now)
            .await
            .int_err()?;

        tracing::debug!(deleted, "Expired login challenges removed");

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
