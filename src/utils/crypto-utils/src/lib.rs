// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod evm_address;
mod evm_signer;
mod personal_sign;
mod typed_data;

pub use alloy_primitives::{Address, B256, I256, U256, keccak256};
pub use evm_address::*;
pub use evm_signer::*;
pub use personal_sign::*;
pub use typed_data::*;
