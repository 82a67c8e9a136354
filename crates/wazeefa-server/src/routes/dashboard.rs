// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-scoped dashboard handler.

use axum::{extract::State, response::IntoResponse, Json};

use wazeefa_server_auth::Role;

pub use wazeefa_server_api::dashboard::*;

use crate::{
	api::AppState,
	api_response::internal_error,
	auth_middleware::RequireAuth,
	i18n::{caller_locale, t},
	error_body,
};

error_body!(DashboardErrorResponse);

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Counts for the caller's role", body = DashboardResponse)
    ),
    tag = "dashboard"
)]
/// GET /api/dashboard - Summary counts for the signed-in user.
///
/// A user whose stored role is outside the known set still gets a 200,
/// with every section absent.
pub async fn get_dashboard(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let user_id = current_user.user.id;

	let response = match current_user.role() {
		Some(Role::Admin) => {
			let (users, postings, applications) = match tokio::try_join!(
				state.user_repo.count(),
				state.posting_repo.count(),
				state.application_repo.count(),
			) {
				Ok(counts) => counts,
				Err(e) => {
					tracing::error!(error = %e, "Failed to load admin dashboard");
					return internal_error::<DashboardErrorResponse>(
						t(locale, "api.internal_error"),
					)
					.into_response();
				}
			};
			DashboardResponse {
				role: Some(Role::Admin.to_string()),
				admin: Some(AdminDashboard {
					total_users: users,
					total_postings: postings,
					total_applications: applications,
				}),
				employer: None,
				employee: None,
			}
		}
		Some(Role::Employer) => {
			let (postings, pending, unread) = match tokio::try_join!(
				state.posting_repo.list_for_employer(&user_id),
				state.application_repo.count_pending_for_employer(&user_id),
				state.message_repo.count_unread_for_user(&user_id),
			) {
				Ok((postings, pending, unread)) => (postings.len() as i64, pending, unread),
				Err(e) => {
					tracing::error!(error = %e, "Failed to load employer dashboard");
					return internal_error::<DashboardErrorResponse>(
						t(locale, "api.internal_error"),
					)
					.into_response();
				}
			};
			DashboardResponse {
				role: Some(Role::Employer.to_string()),
				admin: None,
				employer: Some(EmployerDashboard {
					postings,
					pending_applications: pending,
					unread_messages: unread,
				}),
				employee: None,
			}
		}
		Some(Role::Employee) => {
			let (applications, unread) = match tokio::try_join!(
				state
					.application_repo
					.list_for_employee(&user_id),
				state.message_repo.count_unread_for_user(&user_id),
			) {
				Ok((applications, unread)) => (applications.len() as i64, unread),
				Err(e) => {
					tracing::error!(error = %e, "Failed to load employee dashboard");
					return internal_error::<DashboardErrorResponse>(
						t(locale, "api.internal_error"),
					)
					.into_response();
				}
			};
			DashboardResponse {
				role: Some(Role::Employee.to_string()),
				admin: None,
				employer: None,
				employee: Some(EmployeeDashboard {
					applications,
					unread_messages: unread,
				}),
			}
		}
		None => DashboardResponse {
			role: None,
			admin: None,
			employer: None,
			employee: None,
		},
	};

	Json(response).into_response()
}
