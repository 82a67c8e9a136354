// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Job application HTTP handlers.
//!
//! Employees submit and withdraw; the posting's employer (or an admin)
//! moves applications through the review workflow. Status writes are
//! guarded on the expected current status, so a stale browser tab
//! answers 409 instead of silently overwriting a concurrent reviewer.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};

use wazeefa_server_auth::{ApplicationId, Role};
use wazeefa_server_db::{Application, ApplicationStatus, DbError};

pub use wazeefa_server_api::applications::*;

use crate::{
	api::AppState,
	api_response::{bad_request, conflict, forbidden, internal_error, not_found},
	auth_middleware::RequireAuth,
	i18n::{caller_locale, t, t_fmt},
	error_body, require_id,
	validation::{parse_application_id, parse_posting_id},
};

error_body!(ApplicationErrorResponse);

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = SubmitApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 403, description = "Employee role required", body = ApplicationErrorResponse),
        (status = 404, description = "Posting not found", body = ApplicationErrorResponse),
        (status = 409, description = "Posting closed or already applied", body = ApplicationErrorResponse)
    ),
    tag = "applications"
)]
/// POST /api/applications - Apply to an open posting (employee only).
pub async fn submit_application(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Json(payload): Json<SubmitApplicationRequest>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);

	if current_user.role() != Some(Role::Employee) {
		return forbidden::<ApplicationErrorResponse>("forbidden", t(locale, "auth.forbidden"))
			.into_response();
	}

	let posting_id = require_id!(
		ApplicationErrorResponse,
		parse_posting_id(&payload.posting_id, &t(locale, "api.invalid_id"))
	);

	let posting = match state.posting_repo.find_by_id(&posting_id).await {
		Ok(Some(posting)) => posting,
		Ok(None) => {
			return not_found::<ApplicationErrorResponse>(t(locale, "posting.not_found"))
				.into_response();
		}
		Err(e) => {
			tracing::error!(error = %e, posting_id = %posting_id, "Failed to load posting");
			return internal_error::<ApplicationErrorResponse>(t(locale, "api.internal_error"))
				.into_response();
		}
	};

	if !posting.is_open() {
		return conflict::<ApplicationErrorResponse>("posting_closed", t(locale, "posting.closed"))
			.into_response();
	}

	let now = chrono::Utc::now();
	let application = Application {
		id: ApplicationId::generate(),
		posting_id,
		employee_id: current_user.user.id,
		cover_note: payload.cover_note,
		status: ApplicationStatus::Submitted,
		created_at: now,
		updated_at: now,
	};

	match state.application_repo.insert(&application).await {
		Ok(()) => {
			tracing::info!(
				application_id = %application.id,
				posting_id = %application.posting_id,
				"Application submitted"
			);
			(
				StatusCode::CREATED,
				Json(ApplicationResponse::from(application)),
			)
				.into_response()
		}
		Err(DbError::Conflict(_)) => conflict::<ApplicationErrorResponse>(
			"duplicate_application",
			t(locale, "application.duplicate"),
		)
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "Failed to create application");
			internal_error::<ApplicationErrorResponse>(t(locale, "api.internal_error"))
				.into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "Own applications with posting titles", body = ListEmployeeApplicationsResponse),
        (status = 403, description = "Employee role required", body = ApplicationErrorResponse)
    ),
    tag = "applications"
)]
/// GET /api/applications - List the caller's applications.
pub async fn list_my_applications(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);

	if current_user.role() != Some(Role::Employee) {
		return forbidden::<ApplicationErrorResponse>("forbidden", t(locale, "auth.forbidden"))
			.into_response();
	}

	match state
		.application_repo
		.list_for_employee(&current_user.user.id)
		.await
	{
		Ok(applications) => Json(ListEmployeeApplicationsResponse {
			applications: applications
				.into_iter()
				.map(EmployeeApplicationResponse::from)
				.collect(),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "Failed to list applications");
			internal_error::<ApplicationErrorResponse>(t(locale, "api.internal_error"))
				.into_response()
		}
	}
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/withdraw",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application withdrawn", body = ApplicationSuccessResponse),
        (status = 403, description = "Not the applicant", body = ApplicationErrorResponse),
        (status = 404, description = "Application not found", body = ApplicationErrorResponse),
        (status = 409, description = "Already in a terminal status", body = ApplicationErrorResponse)
    ),
    tag = "applications"
)]
/// POST /api/applications/{id}/withdraw - Withdraw an own application.
pub async fn withdraw_application(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(application_id): Path<String>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let application_id = require_id!(
		ApplicationErrorResponse,
		parse_application_id(&application_id, &t(locale, "api.invalid_id"))
	);

	let application = match state.application_repo.find_by_id(&application_id).await {
		Ok(Some(application)) => application,
		Ok(None) => {
			return not_found::<ApplicationErrorResponse>(t(locale, "application.not_found"))
				.into_response();
		}
		Err(e) => {
			tracing::error!(error = %e, application_id = %application_id, "Failed to load application");
			return internal_error::<ApplicationErrorResponse>(t(locale, "api.internal_error"))
				.into_response();
		}
	};

	if application.employee_id != current_user.user.id {
		return forbidden::<ApplicationErrorResponse>(
			"not_party",
			t(locale, "application.not_party"),
		)
			.into_response();
	}

	let next = ApplicationStatus::Withdrawn;
	if !application.status.can_transition_to(next) {
		return conflict::<ApplicationErrorResponse>(
			"invalid_transition",
			t_fmt(
				locale,
				"application.invalid_transition",
				&[("status", next.as_str())],
			),
		)
			.into_response();
	}

	match state
		.application_repo
		.set_status(&application_id, application.status, next)
		.await
	{
		Ok(true) => Json(ApplicationSuccessResponse {
			message: t(locale, "application.withdrawn"),
		})
		.into_response(),
		// The row moved under us; the stored status no longer matches.
		Ok(false) => conflict::<ApplicationErrorResponse>(
			"invalid_transition",
			t_fmt(
				locale,
				"application.invalid_transition",
				&[("status", next.as_str())],
			),
		)
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, application_id = %application_id, "Failed to withdraw application");
			internal_error::<ApplicationErrorResponse>(t(locale, "api.internal_error"))
				.into_response()
		}
	}
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/status",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 200, description = "Status advanced", body = ApplicationSuccessResponse),
        (status = 400, description = "Unknown or reserved status", body = ApplicationErrorResponse),
        (status = 403, description = "Not the posting's employer", body = ApplicationErrorResponse),
        (status = 404, description = "Application not found", body = ApplicationErrorResponse),
        (status = 409, description = "Transition not allowed from the current status", body = ApplicationErrorResponse)
    ),
    tag = "applications"
)]
/// PUT /api/applications/{id}/status - Advance the review workflow.
///
/// Withdrawal is the applicant's move and has its own endpoint; this one
/// rejects it.
pub async fn update_application_status(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(application_id): Path<String>,
	Json(payload): Json<UpdateApplicationStatusRequest>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let application_id = require_id!(
		ApplicationErrorResponse,
		parse_application_id(&application_id, &t(locale, "api.invalid_id"))
	);

	let next: ApplicationStatus = match payload.status.parse() {
		Ok(status) => status,
		Err(_) => {
			return bad_request::<ApplicationErrorResponse>(
				"invalid_transition",
				t_fmt(
					locale,
					"application.invalid_transition",
					&[("status", &payload.status)],
				),
			)
				.into_response();
		}
	};
	if next == ApplicationStatus::Withdrawn {
		return bad_request::<ApplicationErrorResponse>(
			"invalid_transition",
			t_fmt(
				locale,
				"application.invalid_transition",
				&[("status", next.as_str())],
			),
		)
			.into_response();
	}

	let application = match state.application_repo.find_by_id(&application_id).await {
		Ok(Some(application)) => application,
		Ok(None) => {
			return not_found::<ApplicationErrorResponse>(t(locale, "application.not_found"))
				.into_response();
		}
		Err(e) => {
			tracing::error!(error = %e, application_id = %application_id, "Failed to load application");
			return internal_error::<ApplicationErrorResponse>(t(locale, "api.internal_error"))
				.into_response();
		}
	};

	let posting = match state.posting_repo.find_by_id(&application.posting_id).await {
		Ok(Some(posting)) => posting,
		Ok(None) => {
			return not_found::<ApplicationErrorResponse>(t(locale, "application.not_found"))
				.into_response();
		}
		Err(e) => {
			tracing::error!(error = %e, posting_id = %application.posting_id, "Failed to load posting");
			return internal_error::<ApplicationErrorResponse>(t(locale, "api.internal_error"))
				.into_response();
		}
	};

	let is_owner = posting.employer_id == current_user.user.id;
	let is_admin = current_user.role() == Some(Role::Admin);
	if !is_owner && !is_admin {
		return forbidden::<ApplicationErrorResponse>("not_owner", t(locale, "posting.not_owner"))
			.into_response();
	}

	if !application.status.can_transition_to(next) {
		return conflict::<ApplicationErrorResponse>(
			"invalid_transition",
			t_fmt(
				locale,
				"application.invalid_transition",
				&[("status", next.as_str())],
			),
		)
			.into_response();
	}

	match state
		.application_repo
		.set_status(&application_id, application.status, next)
		.await
	{
		Ok(true) => {
			tracing::info!(
				application_id = %application_id,
				from = application.status.as_str(),
				to = next.as_str(),
				"Application status updated"
			);
			Json(ApplicationSuccessResponse {
				message: t(locale, "application.updated"),
			})
			.into_response()
		}
		Ok(false) => conflict::<ApplicationErrorResponse>(
			"invalid_transition",
			t_fmt(
				locale,
				"application.invalid_transition",
				&[("status", next.as_str())],
			),
		)
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, application_id = %application_id, "Failed to update application status");
			internal_error::<ApplicationErrorResponse>(t(locale, "api.internal_error"))
				.into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/api/postings/{id}/applications",
    params(
        ("id" = String, Path, description = "Posting ID")
    ),
    responses(
        (status = 200, description = "Applications for an owned posting", body = ListPostingApplicationsResponse),
        (status = 403, description = "Not the posting's employer", body = ApplicationErrorResponse),
        (status = 404, description = "Posting not found", body = ApplicationErrorResponse)
    ),
    tag = "applications"
)]
/// GET /api/postings/{id}/applications - Review inbox for one posting.
pub async fn list_posting_applications(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(posting_id): Path<String>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let posting_id = require_id!(
		ApplicationErrorResponse,
		parse_posting_id(&posting_id, &t(locale, "api.invalid_id"))
	);

	let posting = match state.posting_repo.find_by_id(&posting_id).await {
		Ok(Some(posting)) => posting,
		Ok(None) => {
			return not_found::<ApplicationErrorResponse>(t(locale, "posting.not_found"))
				.into_response();
		}
		Err(e) => {
			tracing::error!(error = %e, posting_id = %posting_id, "Failed to load posting");
			return internal_error::<ApplicationErrorResponse>(t(locale, "api.internal_error"))
				.into_response();
		}
	};

	let is_owner = posting.employer_id == current_user.user.id;
	let is_admin = current_user.role() == Some(Role::Admin);
	if !is_owner && !is_admin {
		return forbidden::<ApplicationErrorResponse>("not_owner", t(locale, "posting.not_owner"))
			.into_response();
	}

	match state
		.application_repo
		.list_for_posting(&posting_id)
		.await
	{
		Ok(applications) => Json(ListPostingApplicationsResponse {
			applications: applications
				.into_iter()
				.map(PostingApplicationResponse::from)
				.collect(),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, posting_id = %posting_id, "Failed to list applications");
			internal_error::<ApplicationErrorResponse>(t(locale, "api.internal_error"))
				.into_response()
		}
	}
}
