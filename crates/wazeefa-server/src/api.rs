// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router assembly.
//!
//! The router splits into three layers:
//!
//! - `/api/*` JSON endpoints, wrapped in the session middleware so every
//!   handler sees an [`AuthContext`](wazeefa_server_auth::AuthContext).
//!   Admin endpoints additionally sit behind the admin role check.
//! - `/health` and the OpenAPI UI, outside the session middleware.
//! - A page fallback serving the web bundle (or a JSON 404 without one),
//!   wrapped in the route guard that issues the login and role-home
//!   redirects for protected page prefixes.

use std::sync::Arc;

use axum::{
	middleware::from_fn_with_state,
	routing::{get, post, put},
	Router,
};
use sqlx::SqlitePool;
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use wazeefa_server_auth::{
	password::hash_password, session::mint_session_token, AuthOptions, Role, RouteAccess,
	RouteTable, User, UserId, SESSION_COOKIE_NAME,
};
use wazeefa_server_config::{RoutesConfig, ServerConfig};
use wazeefa_server_db::{
	ApplicationRepository, MessageRepository, PostingRepository, ProfileRepository,
	SessionRepository, UserRepository,
};
use wazeefa_server_jobs::JobScheduler;

use crate::access_middleware::{PageGuard, RequireRole};
use crate::auth_middleware::{auth_layer, require_auth_layer};
use crate::error::ServerError;
use crate::routes;

/// Email address of the auto-provisioned dev-mode account.
const DEV_USER_EMAIL: &str = "dev@wazeefa.local";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub user_repo: Arc<UserRepository>,
	pub session_repo: Arc<SessionRepository>,
	pub profile_repo: Arc<ProfileRepository>,
	pub posting_repo: Arc<PostingRepository>,
	pub application_repo: Arc<ApplicationRepository>,
	pub message_repo: Arc<MessageRepository>,
	pub auth_options: AuthOptions,
	/// Populated only in dev mode; every request then runs as this user.
	pub dev_user: Option<User>,
	pub route_table: Arc<RouteTable>,
	pub default_locale: String,
	/// Set by `main` once the scheduler is running; `/health` reports a
	/// degraded component until then.
	pub job_scheduler: Option<Arc<JobScheduler>>,
}

/// Creates application state from a database pool and resolved config.
pub async fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let user_repo = Arc::new(UserRepository::new(pool.clone()));
	let session_repo = Arc::new(SessionRepository::new(pool.clone()));
	let profile_repo = Arc::new(ProfileRepository::new(pool.clone()));
	let posting_repo = Arc::new(PostingRepository::new(pool.clone()));
	let application_repo = Arc::new(ApplicationRepository::new(pool.clone()));
	let message_repo = Arc::new(MessageRepository::new(pool.clone()));

	let auth_options = AuthOptions {
		dev_mode: config.auth.dev_mode,
		session_cookie_name: SESSION_COOKIE_NAME.to_string(),
		session_ttl_hours: config.auth.session_ttl_hours,
		signups_disabled: config.auth.signups_disabled,
	};

	let dev_user = if auth_options.dev_mode {
		tracing::warn!("════════════════════════════════════════════════════════");
		tracing::warn!("  DEV MODE ENABLED - AUTHENTICATION IS BYPASSED");
		tracing::warn!("  Every request runs as the dev admin account.");
		tracing::warn!("  Never enable this in production.");
		tracing::warn!("════════════════════════════════════════════════════════");
		match create_or_get_dev_user(&user_repo).await {
			Ok(user) => Some(user),
			Err(e) => {
				tracing::error!(error = %e, "Failed to provision dev user");
				None
			}
		}
	} else {
		None
	};

	let route_table = Arc::new(build_route_table(&config.routes));
	tracing::debug!(rules = route_table.len(), "Route table built");

	AppState {
		pool,
		user_repo,
		session_repo,
		profile_repo,
		posting_repo,
		application_repo,
		message_repo,
		auth_options,
		dev_user,
		route_table,
		default_locale: config.locale.default_locale.clone(),
		job_scheduler: None,
	}
}

/// Fetches the dev account, creating it as an admin on first use.
async fn create_or_get_dev_user(user_repo: &Arc<UserRepository>) -> Result<User, ServerError> {
	if let Some(user) = user_repo.find_by_email(DEV_USER_EMAIL).await? {
		if user.role != Some(Role::Admin) {
			user_repo.set_role(&user.id, Role::Admin).await?;
			return Ok(User {
				role: Some(Role::Admin),
				..user
			});
		}
		return Ok(user);
	}

	let now = chrono::Utc::now();
	let user = User {
		id: UserId::generate(),
		display_name: "Dev User".to_string(),
		email: DEV_USER_EMAIL.to_string(),
		role: Some(Role::Admin),
		// Random throwaway password; dev mode never checks it.
		password_hash: hash_password(&mint_session_token())?,
		locale: None,
		created_at: now,
		updated_at: now,
		deleted_at: None,
	};
	user_repo.insert(&user).await?;
	tracing::info!(user_id = %user.id, "Created dev user");
	Ok(user)
}

/// Builds the page route table from configured rules.
///
/// An empty rule list means the stock table, not an open portal. Rules
/// whose role tag is neither `public` nor a known role are skipped with
/// a warning rather than silently protecting the prefix with the wrong
/// requirement.
pub fn build_route_table(routes: &RoutesConfig) -> RouteTable {
	if routes.rules.is_empty() {
		return RouteTable::defaults();
	}

	let rules = routes.rules.iter().filter_map(|rule| {
		let access = if rule.role.eq_ignore_ascii_case("public") {
			RouteAccess::Public
		} else {
			match Role::parse(rule.role.trim().to_lowercase().as_str()) {
				Some(role) => RouteAccess::Role(role),
				None => {
					tracing::warn!(
						prefix = %rule.prefix,
						role = %rule.role,
						"Skipping route rule with unknown role tag"
					);
					return None;
				}
			}
		};
		Some((rule.prefix.clone(), access))
	});

	RouteTable::new(rules)
}

/// Creates the complete router.
pub fn create_router(state: AppState) -> Router {
	let api = Router::new()
		.route("/api/auth/register", post(routes::auth::register))
		.route("/api/auth/login", post(routes::auth::login))
		.route("/api/auth/logout", post(routes::auth::logout))
		.route("/api/auth/me", get(routes::auth::current_user))
		.route(
			"/api/locale",
			get(routes::locale::get_locale).put(routes::locale::set_locale),
		)
		.route("/api/locale/toggle", post(routes::locale::toggle_locale))
		.route(
			"/api/postings",
			get(routes::postings::search_postings).post(routes::postings::create_posting),
		)
		.route("/api/postings/mine", get(routes::postings::list_my_postings))
		.route(
			"/api/postings/{id}",
			get(routes::postings::get_posting)
				.patch(routes::postings::update_posting)
				.delete(routes::postings::delete_posting),
		)
		.route("/api/postings/{id}/close", post(routes::postings::close_posting))
		.route(
			"/api/postings/{id}/applications",
			get(routes::applications::list_posting_applications),
		)
		.route(
			"/api/applications",
			get(routes::applications::list_my_applications)
				.post(routes::applications::submit_application),
		)
		.route(
			"/api/applications/{id}/withdraw",
			post(routes::applications::withdraw_application),
		)
		.route(
			"/api/applications/{id}/status",
			put(routes::applications::update_application_status),
		)
		.route(
			"/api/applications/{id}/messages",
			get(routes::messages::list_messages).post(routes::messages::send_message),
		)
		.route("/api/profile", get(routes::profile::get_profile))
		.route(
			"/api/profile/employee",
			put(routes::profile::upsert_employee_profile),
		)
		.route(
			"/api/profile/employer",
			put(routes::profile::upsert_employer_profile),
		)
		.route("/api/dashboard", get(routes::dashboard::get_dashboard));

	Router::new()
		.merge(api)
		.nest("/api/admin", admin_routes(state.clone()))
		// Session middleware covers everything above; /health and the API
		// docs below stay outside it.
		.layer(from_fn_with_state(state.clone(), auth_layer))
		.route("/health", get(routes::health::health_check))
		.merge(
			SwaggerUi::new("/api/docs")
				.url("/api/openapi.json", crate::api_docs::ApiDoc::openapi()),
		)
		.with_state(state.clone())
		.fallback_service(page_router(state))
}

/// Admin endpoints, mounted under `/api/admin` behind the admin role.
fn admin_routes(state: AppState) -> Router<AppState> {
	Router::new()
		.route("/users", get(routes::admin::list_users))
		.route("/users/{id}", axum::routing::delete(routes::admin::delete_user))
		.route("/users/{id}/role", axum::routing::patch(routes::admin::update_user_role))
		.route("/stats", get(routes::admin::portal_stats))
		.route_layer(RequireRole::admin())
		.layer(from_fn_with_state(state, require_auth_layer))
}

/// Router for page requests: the web bundle when configured, otherwise a
/// JSON 404. Wrapped in the route guard so protected page prefixes issue
/// their redirects before any file is served.
fn page_router(state: AppState) -> Router {
	let pages = match std::env::var("WAZEEFA_SERVER_WEB_DIR") {
		Ok(web_path) if !web_path.is_empty() => {
			tracing::info!(path = %web_path, "Serving web assets");
			Router::new().fallback_service(
				ServeDir::new(&web_path)
					.fallback(ServeFile::new(format!("{web_path}/index.html"))),
			)
		}
		_ => Router::new().fallback(routes::pages::page_fallback),
	};

	pages
		.layer(PageGuard::new(state.route_table.clone()))
		.layer(from_fn_with_state(state.clone(), auth_layer))
		.with_state(state)
}

#[cfg(test)]
mod tests {
	use super::*;
	use wazeefa_server_auth::{AccessDecision, Visitor};
	use wazeefa_server_config::RouteRuleConfig;

	fn rules(pairs: &[(&str, &str)]) -> RoutesConfig {
		RoutesConfig {
			rules: pairs
				.iter()
				.map(|(prefix, role)| RouteRuleConfig {
					prefix: prefix.to_string(),
					role: role.to_string(),
				})
				.collect(),
		}
	}

	#[test]
	fn test_empty_rules_use_stock_table() {
		let table = build_route_table(&RoutesConfig::default());
		assert_eq!(table.len(), 3);
		assert!(matches!(
			table.evaluate("/admin", &Visitor::Anonymous),
			AccessDecision::RedirectToLogin { .. }
		));
	}

	#[test]
	fn test_configured_rules_replace_stock_table() {
		let table = build_route_table(&rules(&[("/portal", "employer")]));
		assert_eq!(table.len(), 1);
		assert_eq!(
			table.evaluate("/admin", &Visitor::Anonymous),
			AccessDecision::Allow
		);
		assert!(matches!(
			table.evaluate("/portal/postings", &Visitor::Anonymous),
			AccessDecision::RedirectToLogin { .. }
		));
	}

	#[test]
	fn test_public_rule_is_a_carve_out() {
		let table = build_route_table(&rules(&[
			("/portal", "employer"),
			("/portal/directory", "public"),
		]));
		assert_eq!(
			table.evaluate("/portal/directory/acme", &Visitor::Anonymous),
			AccessDecision::Allow
		);
	}

	#[test]
	fn test_unknown_role_tag_is_skipped() {
		let table = build_route_table(&rules(&[
			("/admin", "admin"),
			("/moderator", "moderator"),
		]));
		assert_eq!(table.len(), 1);
		assert_eq!(
			table.evaluate("/moderator", &Visitor::Anonymous),
			AccessDecision::Allow
		);
	}

	#[test]
	fn test_role_tags_are_case_and_whitespace_tolerant() {
		let table = build_route_table(&rules(&[("/admin", " Admin ")]));
		assert!(matches!(
			table.evaluate("/admin", &Visitor::Anonymous),
			AccessDecision::RedirectToLogin { .. }
		));
	}

	#[tokio::test]
	async fn test_dev_user_is_created_once_as_admin() {
		let pool = wazeefa_server_db::testing::memory_pool().await;
		let user_repo = Arc::new(UserRepository::new(pool));

		let first = create_or_get_dev_user(&user_repo).await.unwrap();
		assert_eq!(first.email, DEV_USER_EMAIL);
		assert_eq!(first.role, Some(Role::Admin));

		let second = create_or_get_dev_user(&user_repo).await.unwrap();
		assert_eq!(second.id, first.id);
	}

	#[tokio::test]
	async fn test_dev_user_role_is_repaired() {
		let pool = wazeefa_server_db::testing::memory_pool().await;
		let user_repo = Arc::new(UserRepository::new(pool));

		let user = create_or_get_dev_user(&user_repo).await.unwrap();
		user_repo
			.set_role(&user.id, Role::Employee)
			.await
			.unwrap();

		let repaired = create_or_get_dev_user(&user_repo).await.unwrap();
		assert_eq!(repaired.id, user.id);
		assert_eq!(repaired.role, Some(Role::Admin));
	}
}
