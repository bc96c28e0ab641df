// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_LOGIN_APP_NAME: &str = "TipMNEE";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct WalletAuthConfig {
    /// Shown to the user in the wallet signing prompt
    pub app_name: String,
    pub challenge_ttl: chrono::Duration,
}

impl Default for WalletAuthConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_LOGIN_APP_NAME.to_string(),
            challenge_ttl: chrono::Duration::minutes(10),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
