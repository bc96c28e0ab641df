// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod channel_ownership_service_impl;
mod dependencies;
mod jwt_session_token_service;
mod payout_service_impl;

pub use channel_ownership_service_impl::*;
pub use dependencies::*;
pub use jwt_session_token_service::*;
pub use payout_service_impl::*;
