// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections, one file per concern.

pub mod auth;
pub mod database;
pub mod http;
pub mod jobs;
pub mod locale;
pub mod logging;
pub mod routes;

pub use auth::{AuthConfig, AuthConfigLayer};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use jobs::{JobsConfig, JobsConfigLayer};
pub use locale::{LocaleConfig, LocaleConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use routes::{RouteRuleConfig, RoutesConfig, RoutesConfigLayer};
