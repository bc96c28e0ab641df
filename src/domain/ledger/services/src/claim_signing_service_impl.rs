// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::SubsecRound;
use crypto_utils::{B256, Eip712Domain, EvmSigningKey, encode_signature_hex, parse_evm_address};
use internal_error::ResultIntoInternal;
use rand::RngCore;
use time_source::SystemTimeSource;
use tipmnee_accounts::{ChannelOwnershipService, EnsureChannelOwnerError, UserID};
use tipmnee_ledger::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ClaimSigningServiceImpl {
    channel_ownership_service: Arc<dyn ChannelOwnershipService>,
    time_source: Arc<dyn SystemTimeSource>,
    escrow_config: Arc<EscrowConfig>,
    claim_signing_config: Arc<ClaimSigningConfig>,
}

#[dill::component(pub)]
#[dill::interface(dyn ClaimSigningService)]
impl ClaimSigningServiceImpl {
    pub fn new(
        channel_ownership_service: Arc<dyn ChannelOwnershipService>,
        time_source: Arc<dyn SystemTimeSource>,
        escrow_config: Arc<EscrowConfig>,
        claim_signing_config: Arc<ClaimSigningConfig>,
    ) -> Self {
        Self {
            channel_ownership_service,
            time_source,
            escrow_config,
            claim_signing_config,
        }
    }

    fn eip712_domain(&self) -> Eip712Domain {
        Eip712Domain {
            name: self.claim_signing_config.domain_name.clone(),
            version: self.claim_signing_config.domain_version.clone(),
            chain_id: self.escrow_config.chain_id,
            verifying_contract: self.escrow_config.escrow_contract,
        }
    }

    fn generate_claim_nonce() -> B256 {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        B256::from(bytes)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ClaimSigningService for ClaimSigningServiceImpl {
    #[tracing::instrument(level = "info", skip_all, fields(%user_id, %platform_channel_id))]
    async fn sign_claim(
        &self,
        user_id: UserID,
        platform_channel_id: &str,
        payout_address: &str,
    ) -> Result<ClaimPayload, SignClaimError> {
        let platform_channel_id = platform_channel_id.trim();
        if platform_channel_id.is_empty() {
            return Err(SignClaimError::EmptyChannelId);
        }

        let payout_address = parse_evm_address(payout_address)?;

        self.channel_ownership_service
            .ensure_verified_owner(user_id, ESCROW_CHANNEL_PLATFORM, platform_channel_id)
            .await
            .map_err(|e| match e {
                EnsureChannelOwnerError::Ownership(e) => SignClaimError::Ownership(e),
                EnsureChannelOwnerError::Internal(e) => SignClaimError::Internal(e),
            })?;

        let expiry =
            (self.time_source.now() + self.claim_signing_config.claim_ttl).trunc_subsecs(0);

        let claim = Claim {
            channel_id_hash: channel_id_hash(platform_channel_id),
            payout_address,
            expiry: u64::try_from(expiry.timestamp()).int_err()?,
            nonce: Self::generate_claim_nonce(),
        };

        let verifier =
            EvmSigningKey::from_secret(&self.claim_signing_config.verifier_private_key).int_err()?;

        let digest = claim.signing_hash(&self.eip712_domain()).int_err()?;
        let signature = verifier.sign_digest(&digest).int_err()?;

        tracing::info!(
            payout_address = %payout_address,
            %expiry,
            "Withdrawal claim signed"
        );

        Ok(ClaimPayload {
            channel_id_hash: claim.channel_id_hash,
            payout_address,
            expiry,
            nonce: claim.nonce,
            signature: encode_signature_hex(&signature),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
