// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::{ErrorIntoInternal, InternalError, ResultIntoInternal};
use sqlx::PgPool;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct PostgresIdentityRepository {
    pool: Arc<PgPool>,
}

#[dill::component(pub)]
#[dill::interface(dyn IdentityRepository)]
impl PostgresIdentityRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn find_identity(
        &self,
        provider: IdentityProvider,
        provider_user_id: &str,
    ) -> Result<Option<Identity>, FindIdentityError> {
        let maybe_row = sqlx::query_as::<_, IdentityRowModel>(
            r#"
            SELECT user_id,
                   provider,
                   provider_user_id
            FROM identities
            WHERE provider = $1
              AND provider_user_id = $2
            "#,
        )
        .bind(provider.as_ref())
        .bind(provider_user_id)
        .fetch_optional(self.pool.as_ref())
        .await
        .int_err()?;

        let maybe_identity = maybe_row.map(TryInto::try_into).transpose()?;

        Ok(maybe_identity)
    }

    async fn create_user_with_identity(
        &self,
        provider: IdentityProvider,
        provider_user_id: &str,
    ) -> Result<Identity, CreateIdentityError> {
        // Rolled back on drop unless committed
        let mut tr = self.pool.begin().await.int_err()?;

        let user_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users DEFAULT VALUES
            RETURNING id
            "#,
        )
        .fetch_one(&mut *tr)
        .await
        .int_err()?;

        sqlx::query(
            r#"
            INSERT INTO identities (user_id, provider, provider_user_id)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(provider.as_ref())
        .bind(provider_user_id)
        .execute(&mut *tr)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(e) if e.is_unique_violation() => {
                tracing::debug!(
                    %provider,
                    provider_user_id,
                    "Identity already exists: {}",
                    e.message()
                );
                CreateIdentityError::Duplicate(CreateIdentityErrorDuplicate {
                    provider,
                    provider_user_id: provider_user_id.to_string(),
                })
            }
            _ => CreateIdentityError::Internal(e.int_err()),
        })?;

        tr.commit().await.int_err()?;

        Ok(Identity {
            user_id: UserID::new(user_id),
            provider,
            provider_user_id: provider_user_id.to_string(),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(sqlx::FromRow)]
struct IdentityRowModel {
    user_id: i64,
    provider: String,
    provider_user_id: String,
}

impl TryFrom<IdentityRowModel> for Identity {
    type Error = InternalError;

    fn try_from(row: IdentityRowModel) -> Result<Self, Self::Error> {
        Ok(Identity {
            user_id: UserID::new(row.user_id),
            provider: row.provider.parse().int_err()?,
            provider_user_id: row.provider_user_id,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
