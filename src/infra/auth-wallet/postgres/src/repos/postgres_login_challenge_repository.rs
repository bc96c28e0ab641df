// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use crypto_utils::{Address, parse_evm_address, to_lowercase_hex};
use internal_error::{InternalError, ResultIntoInternal};
use sqlx::PgPool;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct PostgresLoginChallengeRepository {
    pool: Arc<PgPool>,
}

#[dill::component(pub)]
#[dill::interface(dyn LoginChallengeRepository)]
impl PostgresLoginChallengeRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl LoginChallengeRepository for PostgresLoginChallengeRepository {
    async fn set_challenge(&self, challenge: &LoginChallenge) -> Result<(), SetChallengeError> {
        sqlx::query(
            r#"
            INSERT INTO wallet_login_challenges(wallet_address, nonce, message, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (wallet_address) DO UPDATE
                SET nonce      = excluded.nonce,
                    message    = excluded.message,
                    expires_at = excluded.expires_at
            "#,
        )
        .bind(to_lowercase_hex(&challenge.wallet_address))
        .bind(&challenge.nonce)
        .bind(&challenge.message)
        .bind(challenge.expires_at)
        .execute(self.pool.as_ref())
        .await
        .int_err()?;

        Ok(())
    }

    async fn take_challenge(
        &self,
        wallet_address: &Address,
    ) -> Result<LoginChallenge, TakeChallengeError> {
        // Single statement, so concurrent takers cannot both see the row
        let maybe_row = sqlx::query_as::<_, LoginChallengeRowModel>(
            r#"
            DELETE
            FROM wallet_login_challenges
            WHERE wallet_address = $1
            RETURNING wallet_address,
                      nonce,
                      message,
                      expires_at
            "#,
        )
        .bind(to_lowercase_hex(wallet_address))
        .fetch_optional(self.pool.as_ref())
        .await
        .int_err()?;

        match maybe_row {
            Some(row) => Ok(row.try_into()?),
            None => Err(ChallengeNotFoundError {
                wallet_address: *wallet_address,
            }
            .into()),
        }
    }

    async fn cleanup_expired_challenges(
        &self,
        now: DateTime<Utc>,
    ) -> Result<u64, CleanupExpiredChallengesError> {
        let delete_result = sqlx::query(
            r#"
            DELETE
            FROM wallet_login_challenges
            WHERE expires_at < $1
            "#,
        )
        .bind(now.trunc_subsecs(0))
        .execute(self.pool.as_ref())
        .await
        .int_err()?;

        Ok(delete_result.rows_affected())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(sqlx::FromRow)]
struct LoginChallengeRowModel {
    wallet_address: String,
    nonce: String,
    message: String,
    expires_at: DateTime<Utc>,
}

impl TryFrom<LoginChallengeRowModel> for LoginChallenge {
    type Error = InternalError;

    fn try_from(row: LoginChallengeRowModel) -> Result<Self, Self::Error> {
        Ok(LoginChallenge {
            wallet_address: parse_evm_address(&row.wallet_address).int_err()?,
            nonce: row.nonce,
            message: row.message,
            expires_at: row.expires_at,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
