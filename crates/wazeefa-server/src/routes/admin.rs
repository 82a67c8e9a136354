// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin HTTP handlers.
//!
//! Everything here is mounted under `/api/admin` behind the admin role
//! check, so the handlers only deal with their own argument validation.

use axum::{
	extract::{Path, Query, State},
	response::IntoResponse,
	Json,
};

pub use wazeefa_server_api::admin::*;

use crate::{
	api::AppState,
	api_response::{conflict, internal_error, not_found},
	auth_middleware::RequireAuth,
	i18n::{caller_locale, t},
	error_body, require_id, require_role,
	validation::{parse_portal_role, parse_user_id},
};

error_body!(AdminErrorResponse);

const MAX_PAGE_SIZE: u32 = 200;

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Users newest-first with total", body = UserListResponse)
    ),
    tag = "admin"
)]
/// GET /api/admin/users - Page through registered users.
pub async fn list_users(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Query(params): Query<UserListQuery>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let limit = params.limit.clamp(1, MAX_PAGE_SIZE);

	match state.user_repo.list(limit, params.offset).await {
		Ok((users, total)) => Json(UserListResponse {
			users: users.into_iter().map(AdminAccountResponse::from).collect(),
			total,
			limit,
			offset: params.offset,
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "Failed to list users");
			internal_error::<AdminErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/role",
    params(
        ("id" = String, Path, description = "Account id (UUID)")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role assigned", body = AdminSuccessResponse),
        (status = 400, description = "Unknown role tag", body = AdminErrorResponse),
        (status = 404, description = "No such user", body = AdminErrorResponse)
    ),
    tag = "admin"
)]
/// PATCH /api/admin/users/{id}/role - Assign a user's role.
///
/// This is also the repair path for accounts whose stored role fell
/// outside the known set.
pub async fn update_user_role(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(user_id): Path<String>,
	Json(payload): Json<UpdateRoleRequest>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let user_id = require_id!(
		AdminErrorResponse,
		parse_user_id(&user_id, &t(locale, "api.invalid_id"))
	);
	let role = require_role!(
		AdminErrorResponse,
		parse_portal_role(&payload.role, &t(locale, "auth.invalid_role"))
	);

	match state.user_repo.set_role(&user_id, role).await {
		Ok(true) => {
			tracing::info!(user_id = %user_id, role = role.as_str(), "User role updated");
			Json(AdminSuccessResponse {
				message: t(locale, "admin.role_updated"),
			})
			.into_response()
		}
		Ok(false) => {
			not_found::<AdminErrorResponse>(t(locale, "api.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, user_id = %user_id, "Failed to update role");
			internal_error::<AdminErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(
        ("id" = String, Path, description = "Account id (UUID)")
    ),
    responses(
        (status = 200, description = "User removed", body = AdminSuccessResponse),
        (status = 404, description = "No such user", body = AdminErrorResponse),
        (status = 409, description = "Refusing to delete own account", body = AdminErrorResponse)
    ),
    tag = "admin"
)]
/// DELETE /api/admin/users/{id} - Soft-delete a user and end their sessions.
pub async fn delete_user(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(user_id): Path<String>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let user_id = require_id!(
		AdminErrorResponse,
		parse_user_id(&user_id, &t(locale, "api.invalid_id"))
	);

	if user_id == current_user.user.id {
		return conflict::<AdminErrorResponse>(
			"cannot_delete_self",
			t(locale, "admin.cannot_delete_self"),
		)
			.into_response();
	}

	match state.user_repo.soft_delete(&user_id).await {
		Ok(true) => {
			// The row is already gone from every listing; losing the session
			// sweep only delays logout until expiry.
			if let Err(e) = state.session_repo.delete_for_user(&user_id).await {
				tracing::warn!(error = %e, user_id = %user_id, "Failed to delete sessions for removed user");
			}
			Json(AdminSuccessResponse {
				message: t(locale, "admin.user_deleted"),
			})
			.into_response()
		}
		Ok(false) => {
			not_found::<AdminErrorResponse>(t(locale, "api.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, user_id = %user_id, "Failed to delete user");
			internal_error::<AdminErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Portal-wide counters", body = PortalStatsResponse)
    ),
    tag = "admin"
)]
/// GET /api/admin/stats - Portal-wide counters.
pub async fn portal_stats(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);

	match tokio::try_join!(
		state.user_repo.count(),
		state.posting_repo.count(),
		state.posting_repo.count_open(),
		state.application_repo.count(),
	) {
		Ok((total_users, total_postings, open_postings, total_applications)) => {
			Json(PortalStatsResponse {
				total_users,
				total_postings,
				open_postings,
				total_applications,
			})
			.into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, "Failed to load portal stats");
			internal_error::<AdminErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}
