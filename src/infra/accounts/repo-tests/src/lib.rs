// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod channel_link_repository_test_suite;
mod identity_repository_test_suite;
mod payout_repository_test_suite;

pub mod channel_link_repository {
    pub use crate::channel_link_repository_test_suite::*;
}

pub mod identity_repository {
    pub use crate::identity_repository_test_suite::*;
}

pub mod payout_repository {
    pub use crate::payout_repository_test_suite::*;
}
