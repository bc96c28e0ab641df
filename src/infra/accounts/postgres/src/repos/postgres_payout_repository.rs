// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use internal_error::{InternalError, ResultIntoInternal};
use sqlx::PgPool;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct PostgresPayoutRepository {
    pool: Arc<PgPool>,
}

#[dill::component(pub)]
#[dill::interface(dyn PayoutRepository)]
impl PostgresPayoutRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl PayoutRepository for PostgresPayoutRepository {
    async fn set_payout_address(&self, payout: &PayoutAddress) -> Result<(), SetPayoutAddressError> {
        sqlx::query(
            r#"
            INSERT INTO payout_addresses (user_id, chain, address, updated_at)
            VALUES (, , , NOW())
            ON CONFLICT (user_id, chain)
            DO UPDATE SET address = EXCLUDED.address,
                          updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(payout.user_id.as_i64())
        .bind(payout.chain.as_ref())
        .bind(crypto_utils::to_lowercase_hex(&payout.address))
        .execute(self.pool.as_ref())
        .await
        .int_err()?;

        Ok(())
    }

    async fn find_payout_address(
        &self,
        user_id: UserID,
        chain: PayoutChain,
    ) -> Result<Option<PayoutAddress>, FindPayoutAddressError> {
        let maybe_row = sqlx::query_as::<_, PayoutAddressRowModel>(
            r#"
            SELECT user_id,
                   chain,
                   address
            FROM payout_addresses
            WHERE user_id = 
              AND chain = 
            "#,
        )
        .bind(user_id.as_i64())
        .bind(chain.as_ref())
        .fetch_optional(self.pool.as_ref())
        .await
        .int_err()?;

        let maybe_payout = maybe_row.map(TryInto::try_into).transpose()?;

        Ok(maybe_payout)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(sqlx::FromRow)]
struct PayoutAddressRowModel {
    user_id: i64,
    chain: String,
    address: String,
}

impl TryFrom<PayoutAddressRowModel> for PayoutAddress {
    type Error = InternalError;

    fn try_from(row: PayoutAddressRowModel) -> Result<Self, Self::Error> {
        Ok(PayoutAddress {
            user_id: UserID::new(row.user_id),
            chain: row.chain.parse().int_err()?,
            address: crypto_utils::parse_evm_address(&row.address).int_err()?,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
