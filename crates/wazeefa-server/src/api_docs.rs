// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for wazeefa-server.
//!
//! Generated from Rust types using utoipa. The interactive documentation
//! is served at `/api/docs` and the raw JSON spec at `/api/openapi.json`.

use utoipa::OpenApi;

/// The OpenAPI document, assembled from every route's annotations.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wazeefa API",
        version = "0.1.0",
        description = "Bilingual job portal API: postings, applications, messaging, and role-scoped access for employers, employees, and admins.",
        license(name = "Proprietary"),
        contact(
            name = "Geoffrey Huntley",
            email = "ghuntley@ghuntley.com",
            url = "https://ghuntley.com"
        )
    ),
    servers(
        (url = "/", description = "Same-origin deployment")
    ),
    tags(
        (name = "auth", description = "Registration, login, and session management"),
        (name = "locale", description = "Language preference and toggling"),
        (name = "postings", description = "Job posting search and management"),
        (name = "applications", description = "Job applications and their review workflow"),
        (name = "messages", description = "Per-application message threads"),
        (name = "profile", description = "Employee and employer profiles"),
        (name = "dashboard", description = "Role-scoped summary counts"),
        (name = "admin", description = "User administration (admin only)"),
        (name = "health", description = "Health checks and system status")
    ),
    paths(
        // Auth endpoints
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::current_user,
        // Locale endpoints
        crate::routes::locale::get_locale,
        crate::routes::locale::set_locale,
        crate::routes::locale::toggle_locale,
        // Posting endpoints
        crate::routes::postings::search_postings,
        crate::routes::postings::get_posting,
        crate::routes::postings::create_posting,
        crate::routes::postings::update_posting,
        crate::routes::postings::close_posting,
        crate::routes::postings::delete_posting,
        crate::routes::postings::list_my_postings,
        // Application endpoints
        crate::routes::applications::submit_application,
        crate::routes::applications::list_my_applications,
        crate::routes::applications::withdraw_application,
        crate::routes::applications::update_application_status,
        crate::routes::applications::list_posting_applications,
        // Message endpoints
        crate::routes::messages::list_messages,
        crate::routes::messages::send_message,
        // Profile endpoints
        crate::routes::profile::get_profile,
        crate::routes::profile::upsert_employee_profile,
        crate::routes::profile::upsert_employer_profile,
        // Dashboard endpoint
        crate::routes::dashboard::get_dashboard,
        // Admin endpoints
        crate::routes::admin::list_users,
        crate::routes::admin::update_user_role,
        crate::routes::admin::delete_user,
        crate::routes::admin::portal_stats,
        // Health endpoint
        crate::routes::health::health_check,
    ),
    components(
        schemas(
            // Auth types
            crate::routes::auth::RegisterRequest,
            crate::routes::auth::LoginRequest,
            crate::routes::auth::LoginResponse,
            crate::routes::auth::AuthUserResponse,
            crate::routes::auth::MeResponse,
            crate::routes::auth::AuthSuccessResponse,
            crate::routes::auth::AuthErrorResponse,
            // Locale types
            crate::routes::locale::LocaleResponse,
            crate::routes::locale::AvailableLocaleResponse,
            crate::routes::locale::SetLocaleRequest,
            crate::routes::locale::SetLocaleResponse,
            // Posting types
            crate::routes::postings::PostingResponse,
            crate::routes::postings::PostingDetailResponse,
            crate::routes::postings::ListPostingsResponse,
            crate::routes::postings::EmployerPostingResponse,
            crate::routes::postings::ListEmployerPostingsResponse,
            crate::routes::postings::CreatePostingRequest,
            crate::routes::postings::UpdatePostingRequest,
            crate::routes::postings::PostingSuccessResponse,
            crate::routes::postings::PostingErrorResponse,
            // Application types
            crate::routes::applications::ApplicationResponse,
            crate::routes::applications::EmployeeApplicationResponse,
            crate::routes::applications::PostingApplicationResponse,
            crate::routes::applications::ListEmployeeApplicationsResponse,
            crate::routes::applications::ListPostingApplicationsResponse,
            crate::routes::applications::SubmitApplicationRequest,
            crate::routes::applications::UpdateApplicationStatusRequest,
            crate::routes::applications::ApplicationSuccessResponse,
            crate::routes::applications::ApplicationErrorResponse,
            // Message types
            crate::routes::messages::MessageResponse,
            crate::routes::messages::ListMessagesResponse,
            crate::routes::messages::SendMessageRequest,
            crate::routes::messages::MessageErrorResponse,
            // Profile types
            crate::routes::profile::EmployeeProfileResponse,
            crate::routes::profile::EmployerProfileResponse,
            crate::routes::profile::ProfileResponse,
            crate::routes::profile::UpsertEmployeeProfileRequest,
            crate::routes::profile::UpsertEmployerProfileRequest,
            crate::routes::profile::ProfileSuccessResponse,
            crate::routes::profile::ProfileErrorResponse,
            // Dashboard types
            crate::routes::dashboard::DashboardResponse,
            crate::routes::dashboard::AdminDashboard,
            crate::routes::dashboard::EmployerDashboard,
            crate::routes::dashboard::EmployeeDashboard,
            crate::routes::dashboard::DashboardErrorResponse,
            // Admin types
            crate::routes::admin::AdminAccountResponse,
            crate::routes::admin::UserListResponse,
            crate::routes::admin::UpdateRoleRequest,
            crate::routes::admin::PortalStatsResponse,
            crate::routes::admin::AdminSuccessResponse,
            crate::routes::admin::AdminErrorResponse,
            // Health types
            crate::health::HealthResponse,
            crate::health::HealthStatus,
            crate::health::HealthComponents,
            crate::health::ComponentHealth,
            // Error types
            crate::error::ErrorResponse,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
	use super::*;

	fn spec_json() -> String {
		serde_json::to_string(&ApiDoc::openapi()).unwrap()
	}

	#[test]
	fn spec_serializes_with_title_and_version() {
		let json = spec_json();
		assert!(json.contains("\"openapi\""));
		assert!(json.contains("Wazeefa API"));
	}

	#[test]
	fn every_route_tag_appears_in_the_spec() {
		let json = spec_json();
		for tag in [
			"auth",
			"locale",
			"postings",
			"applications",
			"messages",
			"profile",
			"dashboard",
			"admin",
			"health",
		] {
			assert!(json.contains(tag), "tag {tag} fell out of the spec");
		}
	}

	#[test]
	fn documented_paths_appear_in_the_spec() {
		let json = spec_json();
		for path in [
			"/api/auth/register",
			"/api/auth/login",
			"/api/locale",
			"/api/locale/toggle",
			"/api/postings",
			"/api/postings/{id}",
			"/api/applications",
			"/api/applications/{id}/messages",
			"/api/profile",
			"/api/dashboard",
			"/api/admin/users",
			"/api/admin/stats",
			"/health",
		] {
			assert!(json.contains(path), "path {path} fell out of the spec");
		}
	}
}
