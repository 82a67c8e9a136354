// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers, one module per API group.

pub mod admin;
pub mod applications;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod locale;
pub mod messages;
pub mod pages;
pub mod postings;
pub mod profile;
