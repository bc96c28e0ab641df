// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::UserID;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum IdentityProvider {
    /// `provider_user_id` is a lowercase `0x` wallet address
    Wallet,
    /// `provider_user_id` is the OAuth subject
    Google,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A way to log in as a user. `(provider, provider_user_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserID,
    pub provider: IdentityProvider,
    pub provider_user_id: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
