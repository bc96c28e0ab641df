// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::{BoxedError, InternalError};
use thiserror::Error;

use crate::UserID;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Issues and validates the signed session tokens handed out after login
pub trait SessionTokenService: Send + Sync {
    fn issue_session_token(&self, user_id: UserID) -> Result<String, InternalError>;

    fn user_id_by_session_token(&self, session_token: &str) -> Result<UserID, SessionTokenError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("Invalid session token")]
    Invalid(#[source] BoxedError),

    #[error("Expired session token")]
    Expired,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
