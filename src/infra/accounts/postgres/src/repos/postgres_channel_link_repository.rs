// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use internal_error::{ErrorIntoInternal, InternalError, ResultIntoInternal};
use sqlx::PgPool;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct PostgresChannelLinkRepository {
    pool: Arc<PgPool>,
}

#[dill::component(pub)]
#[dill::interface(dyn ChannelLinkRepository)]
impl PostgresChannelLinkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ChannelLinkRepository for PostgresChannelLinkRepository {
    async fn create_channel_link(&self, link: &ChannelLink) -> Result<(), CreateChannelLinkError> {
        sqlx::query(
            r#"
            INSERT INTO channel_links (platform, platform_channel_id, user_id, verified_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(link.platform.as_ref())
        .bind(&link.platform_channel_id)
        .bind(link.user_id.as_i64())
        .bind(link.verified_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(e) if e.is_unique_violation() => {
                CreateChannelLinkError::Duplicate {
                    platform: link.platform,
                    platform_channel_id: link.platform_channel_id.clone(),
                }
            }
            _ => CreateChannelLinkError::Internal(e.int_err()),
        })?;

        Ok(())
    }

    async fn find_channel_link(
        &self,
        platform: Platform,
        platform_channel_id: &str,
    ) -> Result<Option<ChannelLink>, FindChannelLinkError> {
        let maybe_row = sqlx::query_as::<_, ChannelLinkRowModel>(
            r#"
            SELECT platform,
                   platform_channel_id,
                   user_id,
                   verified_at
            FROM channel_links
            WHERE platform = $1
              AND platform_channel_id = $2
            "#,
        )
        .bind(platform.as_ref())
        .bind(platform_channel_id)
        .fetch_optional(self.pool.as_ref())
        .await
        .int_err()?;

        let maybe_link = maybe_row.map(TryInto::try_into).transpose()?;

        Ok(maybe_link)
    }

    async fn mark_channel_link_verified(
        &self,
        platform: Platform,
        platform_channel_id: &str,
        verified_at: DateTime<Utc>,
    ) -> Result<(), MarkChannelLinkVerifiedError> {
        let update_result = sqlx::query(
            r#"
            UPDATE channel_links
            SET verified_at = $3
            WHERE platform = $1
              AND platform_channel_id = $2
            "#,
        )
        .bind(platform.as_ref())
        .bind(platform_channel_id)
        .bind(verified_at)
        .execute(self.pool.as_ref())
        .await
        .int_err()?;

        if update_result.rows_affected() == 0 {
            return Err(MarkChannelLinkVerifiedError::NotFound {
                platform,
                platform_channel_id: platform_channel_id.to_string(),
            });
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(sqlx::FromRow)]
struct ChannelLinkRowModel {
    platform: String,
    platform_channel_id: String,
    user_id: i64,
    verified_at: Option<DateTime<Utc>>,
}

impl TryFrom<ChannelLinkRowModel> for ChannelLink {
    type Error = InternalError;

    fn try_from(row: ChannelLinkRowModel) -> Result<Self, Self::Error> {
        Ok(ChannelLink {
            user_id: UserID::new(row.user_id),
            platform: row.platform.parse().int_err()?,
            platform_channel_id: row.platform_channel_id,
            verified_at: row.verified_at,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
