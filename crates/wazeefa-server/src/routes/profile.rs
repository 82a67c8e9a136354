// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Profile HTTP handlers.
//!
//! A user has at most one profile matching their role. GET returns
//! whichever side exists; the PUT endpoints upsert, so the first save
//! creates the profile.

use axum::{extract::State, response::IntoResponse, Json};

use wazeefa_server_auth::Role;
use wazeefa_server_db::{EmployeeProfile, EmployerProfile};

pub use wazeefa_server_api::profile::*;

use crate::{
	api::AppState,
	api_response::{forbidden, internal_error, not_found},
	auth_middleware::RequireAuth,
	i18n::{caller_locale, t},
	error_body,
};

error_body!(ProfileErrorResponse);

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "The caller's profile", body = ProfileResponse),
        (status = 404, description = "No profile saved yet", body = ProfileErrorResponse)
    ),
    tag = "profile"
)]
/// GET /api/profile - Fetch the caller's profile for their role.
pub async fn get_profile(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let user_id = current_user.user.id;

	let (employee, employer) = match current_user.role() {
		Some(Role::Employee) => match state.profile_repo.find_employee(&user_id).await {
			Ok(profile) => (profile, None),
			Err(e) => {
				tracing::error!(error = %e, "Failed to load employee profile");
				return internal_error::<ProfileErrorResponse>(t(locale, "api.internal_error"))
					.into_response();
			}
		},
		Some(Role::Employer) => match state.profile_repo.find_employer(&user_id).await {
			Ok(profile) => (None, profile),
			Err(e) => {
				tracing::error!(error = %e, "Failed to load employer profile");
				return internal_error::<ProfileErrorResponse>(t(locale, "api.internal_error"))
					.into_response();
			}
		},
		_ => (None, None),
	};

	if employee.is_none() && employer.is_none() {
		return not_found::<ProfileErrorResponse>(t(locale, "profile.not_found")).into_response();
	}

	Json(ProfileResponse {
		employee: employee.map(EmployeeProfileResponse::from),
		employer: employer.map(EmployerProfileResponse::from),
	})
	.into_response()
}

#[utoipa::path(
    put,
    path = "/api/profile/employee",
    request_body = UpsertEmployeeProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = ProfileSuccessResponse),
        (status = 403, description = "Employee role required", body = ProfileErrorResponse)
    ),
    tag = "profile"
)]
/// PUT /api/profile/employee - Create or replace the job seeker profile.
pub async fn upsert_employee_profile(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Json(payload): Json<UpsertEmployeeProfileRequest>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);

	if current_user.role() != Some(Role::Employee) {
		return forbidden::<ProfileErrorResponse>("forbidden", t(locale, "auth.forbidden"))
			.into_response();
	}

	let profile = EmployeeProfile {
		user_id: current_user.user.id,
		headline: payload.headline.trim().to_string(),
		bio: payload.bio,
		skills: payload.skills,
		years_experience: payload.years_experience,
		cv_summary: payload.cv_summary,
	};

	match state.profile_repo.upsert_employee(&profile).await {
		Ok(()) => Json(ProfileSuccessResponse {
			message: t(locale, "profile.updated"),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "Failed to save employee profile");
			internal_error::<ProfileErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

#[utoipa::path(
    put,
    path = "/api/profile/employer",
    request_body = UpsertEmployerProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = ProfileSuccessResponse),
        (status = 403, description = "Employer role required", body = ProfileErrorResponse)
    ),
    tag = "profile"
)]
/// PUT /api/profile/employer - Create or replace the company profile.
pub async fn upsert_employer_profile(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Json(payload): Json<UpsertEmployerProfileRequest>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);

	if current_user.role() != Some(Role::Employer) {
		return forbidden::<ProfileErrorResponse>("forbidden", t(locale, "auth.forbidden"))
			.into_response();
	}

	let profile = EmployerProfile {
		user_id: current_user.user.id,
		company_name: payload.company_name.trim().to_string(),
		about: payload.about,
		website: payload.website,
	};

	match state.profile_repo.upsert_employer(&profile).await {
		Ok(()) => Json(ProfileSuccessResponse {
			message: t(locale, "profile.updated"),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "Failed to save employer profile");
			internal_error::<ProfileErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}
