// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod channel_ownership_service;
mod jwt_authentication_config;
mod payout_service;
mod session_token_service;

pub use channel_ownership_service::*;
pub use jwt_authentication_config::*;
pub use payout_service::*;
pub use session_token_service::*;
