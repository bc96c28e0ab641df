// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tipmnee_accounts::{
    ChannelOwnershipError,
    EnsureChannelOwnerError,
    ResolveChannelPayoutError,
    SessionTokenError,
    SetPayoutError,
};
use tipmnee_auth_wallet::{IssueChallengeError, WalletLoginError};
use tipmnee_ledger::{RecordLedgerEventsError, SignClaimError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Error returned from HTTP handlers.
///
/// Handlers convert domain errors explicitly:
///
/// ```
/// async fn handler() -> Result<Json<Response>, ApiError> {
///     let result = service.operation().await.api_err()?;
///     Ok(Json(result.into()))
/// }
/// ```
///
/// [From] is only implemented for [`InternalError`]. The status of a domain
/// error comes from its category (see [`ApiErrorCategorizable`]); a handler
/// that needs another code for some variant builds the [`ApiError`] itself.
///
/// Internal errors are logged and answered with an empty body, everything
/// else is answered with `{"message": "..."}` built from the error text.
#[derive(Debug, Error)]
#[error("api error {status_code:?}")]
pub struct ApiError {
    pub status_code: http::StatusCode,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl ApiError {
    pub fn new(
        source: impl std::error::Error + Send + Sync + 'static,
        status_code: http::StatusCode,
    ) -> Self {
        Self {
            status_code,
            source: source.into(),
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(e: InternalError) -> Self {
        e.api_err()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorResponse {
    pub message: String,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if self.status_code == http::StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error = ?self.source,
                error_msg = %self.source,
                status_code = %self.status_code,
                "Internal API error",
            );
            (self.status_code, "").into_response()
        } else {
            tracing::warn!(
                error_msg = %self.source,
                status_code = %self.status_code,
                "API error",
            );

            let response_body = axum::response::Json(ApiErrorResponse {
                message: self.source.to_string(),
            });

            (self.status_code, response_body).into_response()
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Explicit conversion into [`ApiError`]
pub trait IntoApiError {
    fn api_err(self) -> ApiError;
}

/// Allows using `.api_err()` on [Result] types
pub trait ResultIntoApiError<K, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<K, ApiError>;
}

impl<K, E> ResultIntoApiError<K, E> for Result<K, E>
where
    E: IntoApiError,
{
    fn api_err(self) -> Result<K, ApiError> {
        self.map_err(IntoApiError::api_err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Error kinds shared by every operation, each with a fixed status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Client-fixable: malformed address, hash or channel, wrong chain
    InvalidInput,
    /// Bad, missing or expired challenge, signature or session token
    Unauthorized,
    /// Channel ownership requirement not met
    Forbidden,
    /// Unknown transaction, may appear later
    NotFound,
    /// Transaction exists but is not mined yet
    Conflict,
    Internal,
}

impl ApiErrorCategory {
    pub fn status_code(self) -> http::StatusCode {
        match self {
            Self::InvalidInput => http::StatusCode::BAD_REQUEST,
            Self::Unauthorized => http::StatusCode::UNAUTHORIZED,
            Self::Forbidden => http::StatusCode::FORBIDDEN,
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::Conflict => http::StatusCode::CONFLICT,
            Self::Internal => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub trait ApiErrorCategorizable {
    fn categorize(&self) -> ApiErrorCategory;
}

impl<E> IntoApiError for E
where
    E: ApiErrorCategorizable,
    E: std::error::Error + Send + Sync + 'static,
{
    fn api_err(self) -> ApiError {
        let status_code = self.categorize().status_code();
        ApiError::new(self, status_code)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl ApiErrorCategorizable for InternalError {
    fn categorize(&self) -> ApiErrorCategory {
        ApiErrorCategory::Internal
    }
}

impl ApiErrorCategorizable for SessionTokenError {
    fn categorize(&self) -> ApiErrorCategory {
        ApiErrorCategory::Unauthorized
    }
}

impl ApiErrorCategorizable for ChannelOwnershipError {
    fn categorize(&self) -> ApiErrorCategory {
        ApiErrorCategory::Forbidden
    }
}

impl ApiErrorCategorizable for EnsureChannelOwnerError {
    fn categorize(&self) -> ApiErrorCategory {
        match self {
            Self::Ownership(e) => e.categorize(),
            Self::Internal(_) => ApiErrorCategory::Internal,
        }
    }
}

impl ApiErrorCategorizable for SetPayoutError {
    fn categorize(&self) -> ApiErrorCategory {
        match self {
            Self::InvalidAddress(_) => ApiErrorCategory::InvalidInput,
            Self::Internal(_) => ApiErrorCategory::Internal,
        }
    }
}

impl ApiErrorCategorizable for ResolveChannelPayoutError {
    fn categorize(&self) -> ApiErrorCategory {
        match self {
            Self::EmptyChannelId => ApiErrorCategory::InvalidInput,
            Self::Internal(_) => ApiErrorCategory::Internal,
        }
    }
}

impl ApiErrorCategorizable for IssueChallengeError {
    fn categorize(&self) -> ApiErrorCategory {
        match self {
            Self::InvalidAddress(_) => ApiErrorCategory::InvalidInput,
            Self::Internal(_) => ApiErrorCategory::Internal,
        }
    }
}

impl ApiErrorCategorizable for WalletLoginError {
    fn categorize(&self) -> ApiErrorCategory {
        match self {
            Self::InvalidAddress(_) => ApiErrorCategory::InvalidInput,
            Self::ChallengeMissing
            | Self::ChallengeExpired
            | Self::InvalidSignature { .. }
            | Self::SignerMismatch => ApiErrorCategory::Unauthorized,
            Self::Internal(_) => ApiErrorCategory::Internal,
        }
    }
}

impl ApiErrorCategorizable for RecordLedgerEventsError {
    fn categorize(&self) -> ApiErrorCategory {
        match self {
            Self::WrongChainId { .. }
            | Self::InvalidTxHash(_)
            | Self::EmptyChannelId
            | Self::NotSentToEscrow { .. }
            | Self::TransactionFailed { .. }
            | Self::NoMatchingEvent { .. } => ApiErrorCategory::InvalidInput,
            Self::Ownership(e) => e.categorize(),
            Self::TransactionNotFound { .. } => ApiErrorCategory::NotFound,
            Self::NotMined { .. } => ApiErrorCategory::Conflict,
            Self::Internal(_) => ApiErrorCategory::Internal,
        }
    }
}

impl ApiErrorCategorizable for SignClaimError {
    fn categorize(&self) -> ApiErrorCategory {
        match self {
            Self::EmptyChannelId | Self::InvalidPayoutAddress(_) => ApiErrorCategory::InvalidInput,
            Self::Ownership(e) => e.categorize(),
            Self::Internal(_) => ApiErrorCategory::Internal,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
