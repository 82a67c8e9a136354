// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wazeefa job portal server.
//!
//! This crate wires the wazeefa crates into an HTTP server: JSON API
//! routes, session middleware, the page route guard, background jobs,
//! and health reporting.

pub mod access_middleware;
pub mod api;
pub mod api_docs;
pub mod api_response;
pub mod auth_middleware;
pub mod error;
pub mod health;
pub mod i18n;
pub mod jobs;
pub mod routes;
pub mod validation;
pub mod version;

pub use api::{build_route_table, create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use error::{ErrorResponse, ServerError};
pub use wazeefa_server_config::{load, ServerConfig};
