// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for the language preference API.
//!
//! Tests cover:
//! - Default locale reporting with text direction
//! - The locale preference cookie for anonymous visitors
//! - Unsupported locales answered as a no-op, never an error
//! - The two-locale toggle
//! - Stored account preference beating the cookie
//! - Localized error messages on other endpoints

use axum::{
	body::Body,
	http::{
		header::{COOKIE, SET_COOKIE},
		Request, StatusCode,
	},
};
use tempfile::tempdir;
use tower::ServiceExt;

use wazeefa_server::{create_app_state, create_router, AppState, ServerConfig};
use wazeefa_server_db::{create_pool, run_migrations};

async fn setup_test_app() -> (axum::Router, AppState, tempfile::TempDir) {
	let dir = tempdir().unwrap();
	let db_path = dir.path().join("test_locale.db");
	let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
	let pool = create_pool(&db_url, 5).await.unwrap();
	run_migrations(&pool).await.unwrap();
	let config = ServerConfig::default();
	let mut state = create_app_state(pool, &config).await;
	state.auth_options.dev_mode = false;
	(create_router(state.clone()), state, dir)
}

async fn send(
	app: &axum::Router,
	method: &str,
	uri: &str,
	cookie: Option<&str>,
	body: Option<serde_json::Value>,
) -> axum::response::Response {
	let mut builder = Request::builder().uri(uri).method(method);
	if let Some(cookie) = cookie {
		builder = builder.header(COOKIE, cookie);
	}
	let request = match body {
		Some(json) => builder
			.header("content-type", "application/json")
			.body(Body::from(json.to_string()))
			.unwrap(),
		None => builder.body(Body::empty()).unwrap(),
	};
	app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Reporting Tests
// ============================================================================

#[tokio::test]
async fn test_default_locale_is_english_ltr() {
	let (app, _state, _dir) = setup_test_app().await;

	let response = send(&app, "GET", "/api/locale", None, None).await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = body_json(response).await;
	assert_eq!(body["locale"], "en");
	assert_eq!(body["direction"], "ltr");
	let codes: Vec<&str> = body["available"]
		.as_array()
		.unwrap()
		.iter()
		.map(|entry| entry["code"].as_str().unwrap())
		.collect();
	assert_eq!(codes, vec!["en", "ar"]);
}

#[tokio::test]
async fn test_locale_cookie_switches_the_response() {
	let (app, _state, _dir) = setup_test_app().await;

	let response = send(&app, "GET", "/api/locale", Some("wazeefa_locale=ar"), None).await;
	let body = body_json(response).await;
	assert_eq!(body["locale"], "ar");
	assert_eq!(body["direction"], "rtl");
}

// ============================================================================
// Preference Tests
// ============================================================================

#[tokio::test]
async fn test_set_locale_persists_a_cookie() {
	let (app, _state, _dir) = setup_test_app().await;

	let response = send(
		&app,
		"PUT",
		"/api/locale",
		None,
		Some(serde_json::json!({ "locale": "ar" })),
	)
	.await;
	assert_eq!(response.status(), StatusCode::OK);

	let cookie = response
		.headers()
		.get(SET_COOKIE)
		.unwrap()
		.to_str()
		.unwrap();
	assert!(cookie.starts_with("wazeefa_locale=ar"));

	let body = body_json(response).await;
	assert_eq!(body["locale"], "ar");
	assert_eq!(body["direction"], "rtl");
	assert_eq!(body["changed"], true);
}

#[tokio::test]
async fn test_unsupported_locale_is_a_reported_noop() {
	let (app, _state, _dir) = setup_test_app().await;

	let response = send(
		&app,
		"PUT",
		"/api/locale",
		None,
		Some(serde_json::json!({ "locale": "fr" })),
	)
	.await;

	// Still a 200; the active locale is simply unchanged
	assert_eq!(response.status(), StatusCode::OK);
	assert!(response.headers().get(SET_COOKIE).is_none());

	let body = body_json(response).await;
	assert_eq!(body["locale"], "en");
	assert_eq!(body["changed"], false);
}

#[tokio::test]
async fn test_toggle_cycles_between_the_two_locales() {
	let (app, _state, _dir) = setup_test_app().await;

	let first = send(&app, "POST", "/api/locale/toggle", None, None).await;
	let first_body = body_json(first).await;
	assert_eq!(first_body["locale"], "ar");
	assert_eq!(first_body["direction"], "rtl");

	// Toggling again from the switched state returns to the start
	let second = send(
		&app,
		"POST",
		"/api/locale/toggle",
		Some("wazeefa_locale=ar"),
		None,
	)
	.await;
	let second_body = body_json(second).await;
	assert_eq!(second_body["locale"], "en");
	assert_eq!(second_body["direction"], "ltr");
}

// ============================================================================
// Account Preference Tests
// ============================================================================

async fn register(app: &axum::Router, email: &str, extra_cookie: Option<&str>) -> String {
	let body = serde_json::json!({
		"display_name": "Locale Tester",
		"email": email,
		"password": "password123",
		"role": "employee",
	});
	let mut builder = Request::builder()
		.uri("/api/auth/register")
		.method("POST")
		.header("content-type", "application/json");
	if let Some(cookie) = extra_cookie {
		builder = builder.header(COOKIE, cookie);
	}
	let response = app
		.clone()
		.oneshot(builder.body(Body::from(body.to_string())).unwrap())
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::CREATED);
	response
		.headers()
		.get(SET_COOKIE)
		.unwrap()
		.to_str()
		.unwrap()
		.split(';')
		.next()
		.unwrap()
		.to_string()
}

#[tokio::test]
async fn test_signed_in_preference_is_stored_on_the_account() {
	let (app, state, _dir) = setup_test_app().await;
	let cookie = register(&app, "stored@example.com", None).await;

	let response = send(
		&app,
		"PUT",
		"/api/locale",
		Some(&cookie),
		Some(serde_json::json!({ "locale": "ar" })),
	)
	.await;
	assert_eq!(response.status(), StatusCode::OK);

	let user = state
		.user_repo
		.find_by_email("stored@example.com")
		.await
		.unwrap()
		.unwrap();
	assert_eq!(user.locale.as_deref(), Some("ar"));

	// The stored preference now answers even without a locale cookie
	let report = send(&app, "GET", "/api/locale", Some(&cookie), None).await;
	let body = body_json(report).await;
	assert_eq!(body["locale"], "ar");
}

#[tokio::test]
async fn test_stored_preference_beats_the_cookie() {
	let (app, state, _dir) = setup_test_app().await;
	let session = register(&app, "beats@example.com", None).await;

	let user = state
		.user_repo
		.find_by_email("beats@example.com")
		.await
		.unwrap()
		.unwrap();
	state
		.user_repo
		.set_locale(&user.id, Some("ar"))
		.await
		.unwrap();

	let both_cookies = format!("{session}; wazeefa_locale=en");
	let response = send(&app, "GET", "/api/locale", Some(&both_cookies), None).await;
	let body = body_json(response).await;
	assert_eq!(body["locale"], "ar");
}

#[tokio::test]
async fn test_anonymous_locale_cookie_is_adopted_at_registration() {
	let (app, state, _dir) = setup_test_app().await;

	register(&app, "adopted@example.com", Some("wazeefa_locale=ar")).await;

	let user = state
		.user_repo
		.find_by_email("adopted@example.com")
		.await
		.unwrap()
		.unwrap();
	assert_eq!(user.locale.as_deref(), Some("ar"));
}

// ============================================================================
// Localized Error Tests
// ============================================================================

#[tokio::test]
async fn test_errors_follow_the_locale_cookie() {
	let (app, _state, _dir) = setup_test_app().await;

	let response = send(
		&app,
		"GET",
		"/api/dashboard",
		Some("wazeefa_locale=ar"),
		None,
	)
	.await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

	let body = body_json(response).await;
	assert_eq!(
		body["message"].as_str().unwrap(),
		wazeefa_common_i18n::t("ar", "auth.unauthorized")
	);
}
