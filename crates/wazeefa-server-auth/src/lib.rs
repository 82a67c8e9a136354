// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication, sessions, and route access control for the wazeefa server.
//!
//! The crate splits into two halves:
//!
//! - **Identity**: [`User`], [`Session`](session::Session), argon2 password
//!   hashing, and the [`middleware`] types that turn request headers into an
//!   [`AuthContext`].
//! - **Access control**: the pure [`guard`] over a prefix [`RouteTable`],
//!   taking a [`Visitor`] and producing exactly one [`AccessDecision`] with
//!   no side effects.
//!
//! Storage lives in `wazeefa-server-db`; HTTP wiring lives in
//! `wazeefa-server`. Nothing here performs I/O.

pub mod guard;
pub mod middleware;
pub mod password;
pub mod session;
pub mod types;
pub mod user;
pub mod visitor;

pub use guard::{role_home, AccessDecision, RouteAccess, RouteTable, GENERIC_HOME};
pub use middleware::{AuthContext, AuthOptions, AuthRequired, CurrentUser, SESSION_COOKIE_NAME};
pub use types::{ApplicationId, MessageId, PostingId, Role, SessionId, UserId};
pub use user::{User, MIN_PASSWORD_LEN};
pub use visitor::Visitor;
