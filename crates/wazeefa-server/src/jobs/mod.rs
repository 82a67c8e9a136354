// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Background jobs registered with the scheduler at startup.

pub mod posting_expiry;
pub mod session_sweep;

pub use posting_expiry::PostingExpiryJob;
pub use session_sweep::SessionSweepJob;
