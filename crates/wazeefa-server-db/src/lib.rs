// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for the wazeefa server.
//!
//! This crate provides SQLite-backed repositories for users, sessions,
//! profiles, job postings, applications, and messages, plus pool
//! construction and startup migrations. Repositories hold a cloned pool
//! handle and are cheap to share across handlers and background jobs.

pub mod application;
pub mod error;
pub mod message;
pub mod migrations;
pub mod pool;
pub mod posting;
pub mod profile;
mod row;
pub mod session;
pub mod testing;
pub mod user;

pub use application::{
	Application, ApplicationRepository, ApplicationStatus, ApplicationWithApplicant,
	ApplicationWithPosting,
};
pub use error::{DbError, Result};
pub use message::{Message, MessageRepository};
pub use migrations::run_migrations;
pub use pool::create_pool;
pub use posting::{
	EmploymentKind, Posting, PostingDetail, PostingRepository, PostingSearchParams, PostingStatus,
	MAX_SEARCH_LIMIT,
};
pub use profile::{EmployeeProfile, EmployerProfile, ProfileRepository};
pub use session::SessionRepository;
pub use user::UserRepository;
