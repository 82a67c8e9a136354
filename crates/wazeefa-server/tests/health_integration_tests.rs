// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for the health endpoint and the published API spec.

use std::sync::Arc;

use axum::{
	body::Body,
	http::{Request, StatusCode},
};
use tempfile::tempdir;
use tower::ServiceExt;

use wazeefa_server::{create_app_state, create_router, AppState, ServerConfig};
use wazeefa_server_db::{create_pool, run_migrations};
use wazeefa_server_jobs::JobScheduler;

async fn setup_state(db_name: &str) -> (AppState, tempfile::TempDir) {
	let dir = tempdir().unwrap();
	let db_path = dir.path().join(db_name);
	let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
	let pool = create_pool(&db_url, 5).await.unwrap();
	run_migrations(&pool).await.unwrap();
	let config = ServerConfig::default();
	let state = create_app_state(pool, &config).await;
	(state, dir)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
		.await
		.unwrap();
	let status = response.status();
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	(status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_is_degraded_without_a_scheduler() {
	let (state, _dir) = setup_state("test_health_degraded.db").await;
	let app = create_router(state);

	// A missing scheduler degrades the instance but keeps it in rotation
	let (status, body) = get_json(app, "/health").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["status"], "degraded");
	assert_eq!(body["components"]["database"]["status"], "healthy");
	assert_eq!(body["components"]["jobs"]["status"], "degraded");
	assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_health_is_healthy_with_a_scheduler() {
	let (mut state, _dir) = setup_state("test_health_healthy.db").await;
	state.job_scheduler = Some(Arc::new(JobScheduler::new()));
	let app = create_router(state);

	let (status, body) = get_json(app, "/health").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["status"], "healthy");
	assert_eq!(body["components"]["jobs"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_does_not_require_authentication() {
	let (state, _dir) = setup_state("test_health_anon.db").await;
	let app = create_router(state);

	// No cookie, no redirect; monitoring probes stay outside the session
	// middleware entirely
	let response = app
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_spec_is_published() {
	let (state, _dir) = setup_state("test_openapi.db").await;
	let app = create_router(state);

	let (status, body) = get_json(app, "/api/openapi.json").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["info"]["title"], "Wazeefa API");
	assert!(body["paths"].get("/api/auth/login").is_some());
	assert!(body["paths"].get("/api/postings").is_some());
}
