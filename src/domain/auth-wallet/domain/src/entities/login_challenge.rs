// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use crypto_utils::{Address, to_lowercase_hex};
use rand::RngCore;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const LOGIN_NONCE_BYTES: usize = 32;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One-time login challenge. At most one challenge is live per wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginChallenge {
    pub wallet_address: Address,
    pub nonce: String,
    /// Exact text the wallet has to sign
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl LoginChallenge {
    pub fn new(
        app_name: &str,
        wallet_address: Address,
        nonce: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let expires_at = expires_at.trunc_subsecs(0);
        let message = compose_login_message(app_name, &wallet_address, &nonce, expires_at);

        Self {
            wallet_address,
            nonce,
            message,
            expires_at,
        }
    }

    /// Compared at whole-second granularity: the challenge is still valid
    /// during the second it expires in
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.trunc_subsecs(0) > self.expires_at.trunc_subsecs(0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Signed wallets verify this text byte-for-byte, changing the template
/// invalidates every outstanding challenge
pub fn compose_login_message(
    app_name: &str,
    wallet_address: &Address,
    nonce: &str,
    expires_at: DateTime<Utc>,
) -> String {
    format!(
        "{app_name} wants you to sign in with your Ethereum account.\n\nAddress: {}\nNonce: \
         {nonce}\nExpires: {}",
        to_lowercase_hex(wallet_address),
        expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

/// 256 random bits, URL-safe base64 without padding
pub fn generate_login_nonce() -> String {
    let mut bytes = [0u8; LOGIN_NONCE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
