// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Background job scheduler for the wazeefa server.
//!
//! This crate provides periodic background jobs with cooperative
//! cancellation, retry with exponential backoff, and in-memory health
//! tracking surfaced through the server's health endpoint.

pub mod context;
pub mod error;
pub mod health;
pub mod job;
pub mod scheduler;
pub mod tracker;
pub mod types;

pub use context::{CancellationToken, JobContext};
pub use error::{JobError, Result};
pub use health::{HealthState, JobHealth, LastRunSummary, SchedulerHealth};
pub use job::Job;
pub use scheduler::JobScheduler;
pub use tracker::RunTracker;
pub use types::{JobOutput, JobRunRecord, JobStatus, TriggerSource};
