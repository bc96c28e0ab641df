// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{Identity, IdentityProvider};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn find_identity(
        &self,
        provider: IdentityProvider,
        provider_user_id: &str,
    ) -> Result<Option<Identity>, FindIdentityError>;

    /// Creates a new user together with its first identity, atomically.
    /// Fails with [`CreateIdentityError::Duplicate`] when the identity is
    /// already bound to some user.
    async fn create_user_with_identity(
        &self,
        provider: IdentityProvider,
        provider_user_id: &str,
    ) -> Result<Identity, CreateIdentityError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FindIdentityError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CreateIdentityError {
    #[error(transparent)]
    Duplicate(CreateIdentityErrorDuplicate),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Identity {provider}:{provider_user_id} already exists")]
pub struct CreateIdentityErrorDuplicate {
    pub provider: IdentityProvider,
    pub provider_user_id: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
