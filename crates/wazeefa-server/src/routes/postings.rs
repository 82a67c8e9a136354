// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Job posting HTTP handlers.
//!
//! Search and detail are public. Everything that mutates a posting is
//! restricted to the owning employer, with admins allowed to step in on
//! existing postings for moderation.

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};

use wazeefa_server_auth::{PostingId, Role};
use wazeefa_server_db::{EmploymentKind, Posting, PostingSearchParams, PostingStatus};

pub use wazeefa_server_api::postings::*;

use crate::{
	api::AppState,
	api_response::{bad_request, forbidden, internal_error, not_found},
	auth_middleware::RequireAuth,
	i18n::{caller_locale, t},
	error_body, require_id,
	validation::parse_posting_id,
};

error_body!(PostingErrorResponse);

#[utoipa::path(
    get,
    path = "/api/postings",
    params(SearchPostingsParams),
    responses(
        (status = 200, description = "Page of open postings", body = ListPostingsResponse)
    ),
    tag = "postings"
)]
/// GET /api/postings - Search open postings.
///
/// Public: anonymous visitors browse jobs without signing in.
pub async fn search_postings(
	State(state): State<AppState>,
	Query(params): Query<SearchPostingsParams>,
) -> impl IntoResponse {
	let search = PostingSearchParams {
		query: params.q,
		limit: params.limit,
		offset: params.offset,
	};

	match state.posting_repo.search_open(&search).await {
		Ok((postings, total)) => Json(ListPostingsResponse {
			postings: postings.into_iter().map(PostingResponse::from).collect(),
			total,
			limit: search.clamped_limit(),
			offset: search.offset,
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "Posting search failed");
			internal_error::<PostingErrorResponse>(t(
				&state.default_locale,
				"api.internal_error",
			))
			.into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/api/postings/{id}",
    params(
        ("id" = String, Path, description = "Posting ID")
    ),
    responses(
        (status = 200, description = "Posting with company details", body = PostingDetailResponse),
        (status = 404, description = "Posting not found", body = PostingErrorResponse)
    ),
    tag = "postings"
)]
/// GET /api/postings/{id} - Fetch one posting with its company name.
pub async fn get_posting(
	State(state): State<AppState>,
	Path(posting_id): Path<String>,
) -> impl IntoResponse {
	let locale = state.default_locale.as_str();
	let posting_id = require_id!(
		PostingErrorResponse,
		parse_posting_id(&posting_id, &t(locale, "api.invalid_id"))
	);

	match state.posting_repo.find_detail(&posting_id).await {
		Ok(Some(detail)) => Json(PostingDetailResponse::from(detail)).into_response(),
		Ok(None) => {
			not_found::<PostingErrorResponse>(t(locale, "posting.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, posting_id = %posting_id, "Failed to load posting");
			internal_error::<PostingErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

#[utoipa::path(
    post,
    path = "/api/postings",
    request_body = CreatePostingRequest,
    responses(
        (status = 201, description = "Posting published", body = PostingResponse),
        (status = 400, description = "Invalid posting fields", body = PostingErrorResponse),
        (status = 401, description = "Not authenticated", body = PostingErrorResponse),
        (status = 403, description = "Employer role required", body = PostingErrorResponse)
    ),
    tag = "postings"
)]
/// POST /api/postings - Publish a new posting (employer only).
pub async fn create_posting(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Json(payload): Json<CreatePostingRequest>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);

	if current_user.role() != Some(Role::Employer) {
		return forbidden::<PostingErrorResponse>("forbidden", t(locale, "auth.forbidden"))
			.into_response();
	}

	let employment_kind: EmploymentKind = match payload.employment_kind.parse() {
		Ok(kind) => kind,
		Err(_) => {
			return bad_request::<PostingErrorResponse>(
				"invalid_field",
				t(locale, "posting.invalid_field"),
			)
				.into_response();
		}
	};

	if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
		return bad_request::<PostingErrorResponse>(
			"invalid_field",
			t(locale, "posting.invalid_field"),
		)
			.into_response();
	}
	if let (Some(min), Some(max)) = (payload.salary_min, payload.salary_max) {
		if min > max {
			return bad_request::<PostingErrorResponse>(
				"invalid_field",
				t(locale, "posting.invalid_field"),
			)
				.into_response();
		}
	}

	let now = chrono::Utc::now();
	let posting = Posting {
		id: PostingId::generate(),
		employer_id: current_user.user.id,
		title: payload.title.trim().to_string(),
		description: payload.description,
		location: payload.location,
		employment_kind,
		salary_min: payload.salary_min,
		salary_max: payload.salary_max,
		status: PostingStatus::Open,
		closes_at: payload.closes_at,
		created_at: now,
		updated_at: now,
	};

	match state.posting_repo.insert(&posting).await {
		Ok(()) => {
			tracing::info!(posting_id = %posting.id, employer_id = %posting.employer_id, "Posting created");
			(StatusCode::CREATED, Json(PostingResponse::from(posting))).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, "Failed to create posting");
			internal_error::<PostingErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

#[utoipa::path(
    patch,
    path = "/api/postings/{id}",
    params(
        ("id" = String, Path, description = "Posting ID")
    ),
    request_body = UpdatePostingRequest,
    responses(
        (status = 200, description = "Updated posting", body = PostingResponse),
        (status = 400, description = "Invalid posting fields", body = PostingErrorResponse),
        (status = 403, description = "Not the owning employer", body = PostingErrorResponse),
        (status = 404, description = "Posting not found", body = PostingErrorResponse)
    ),
    tag = "postings"
)]
/// PATCH /api/postings/{id} - Update fields on an owned posting.
pub async fn update_posting(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(posting_id): Path<String>,
	Json(payload): Json<UpdatePostingRequest>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let posting_id = require_id!(
		PostingErrorResponse,
		parse_posting_id(&posting_id, &t(locale, "api.invalid_id"))
	);

	let mut posting = match load_owned_posting(&state, &current_user, &posting_id, locale).await {
		Ok(posting) => posting,
		Err(resp) => return resp,
	};

	if let Some(title) = payload.title {
		if title.trim().is_empty() {
			return bad_request::<PostingErrorResponse>(
				"invalid_field",
				t(locale, "posting.invalid_field"),
			)
				.into_response();
		}
		posting.title = title.trim().to_string();
	}
	if let Some(description) = payload.description {
		posting.description = description;
	}
	if let Some(location) = payload.location {
		posting.location = location;
	}
	if let Some(kind) = payload.employment_kind {
		match kind.parse::<EmploymentKind>() {
			Ok(kind) => posting.employment_kind = kind,
			Err(_) => {
				return bad_request::<PostingErrorResponse>(
					"invalid_field",
					t(locale, "posting.invalid_field"),
				)
					.into_response();
			}
		}
	}
	if payload.salary_min.is_some() {
		posting.salary_min = payload.salary_min;
	}
	if payload.salary_max.is_some() {
		posting.salary_max = payload.salary_max;
	}
	if payload.closes_at.is_some() {
		posting.closes_at = payload.closes_at;
	}
	if let (Some(min), Some(max)) = (posting.salary_min, posting.salary_max) {
		if min > max {
			return bad_request::<PostingErrorResponse>(
				"invalid_field",
				t(locale, "posting.invalid_field"),
			)
				.into_response();
		}
	}

	match state.posting_repo.update(&posting).await {
		Ok(true) => Json(PostingResponse::from(posting)).into_response(),
		Ok(false) => {
			not_found::<PostingErrorResponse>(t(locale, "posting.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, posting_id = %posting.id, "Failed to update posting");
			internal_error::<PostingErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

#[utoipa::path(
    post,
    path = "/api/postings/{id}/close",
    params(
        ("id" = String, Path, description = "Posting ID")
    ),
    responses(
        (status = 200, description = "Posting closed", body = PostingSuccessResponse),
        (status = 403, description = "Not the owning employer", body = PostingErrorResponse),
        (status = 404, description = "Posting not found", body = PostingErrorResponse)
    ),
    tag = "postings"
)]
/// POST /api/postings/{id}/close - Stop accepting applications.
pub async fn close_posting(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(posting_id): Path<String>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let posting_id = require_id!(
		PostingErrorResponse,
		parse_posting_id(&posting_id, &t(locale, "api.invalid_id"))
	);

	if let Err(resp) = load_owned_posting(&state, &current_user, &posting_id, locale).await {
		return resp;
	}

	match state.posting_repo.close(&posting_id).await {
		Ok(true) => Json(PostingSuccessResponse {
			message: t(locale, "posting.updated"),
		})
		.into_response(),
		Ok(false) => {
			not_found::<PostingErrorResponse>(t(locale, "posting.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, posting_id = %posting_id, "Failed to close posting");
			internal_error::<PostingErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

#[utoipa::path(
    delete,
    path = "/api/postings/{id}",
    params(
        ("id" = String, Path, description = "Posting ID")
    ),
    responses(
        (status = 200, description = "Posting deleted", body = PostingSuccessResponse),
        (status = 403, description = "Not the owning employer", body = PostingErrorResponse),
        (status = 404, description = "Posting not found", body = PostingErrorResponse)
    ),
    tag = "postings"
)]
/// DELETE /api/postings/{id} - Remove a posting and its applications.
pub async fn delete_posting(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(posting_id): Path<String>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let posting_id = require_id!(
		PostingErrorResponse,
		parse_posting_id(&posting_id, &t(locale, "api.invalid_id"))
	);

	if let Err(resp) = load_owned_posting(&state, &current_user, &posting_id, locale).await {
		return resp;
	}

	match state.posting_repo.delete(&posting_id).await {
		Ok(true) => Json(PostingSuccessResponse {
			message: t(locale, "posting.deleted"),
		})
		.into_response(),
		Ok(false) => {
			not_found::<PostingErrorResponse>(t(locale, "posting.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, posting_id = %posting_id, "Failed to delete posting");
			internal_error::<PostingErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/api/postings/mine",
    responses(
        (status = 200, description = "Own postings with application counts", body = ListEmployerPostingsResponse),
        (status = 401, description = "Not authenticated", body = PostingErrorResponse),
        (status = 403, description = "Employer role required", body = PostingErrorResponse)
    ),
    tag = "postings"
)]
/// GET /api/postings/mine - List own postings with application counts.
pub async fn list_my_postings(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);

	if current_user.role() != Some(Role::Employer) {
		return forbidden::<PostingErrorResponse>("forbidden", t(locale, "auth.forbidden"))
			.into_response();
	}

	match state
		.posting_repo
		.list_for_employer(&current_user.user.id)
		.await
	{
		Ok(postings) => Json(ListEmployerPostingsResponse {
			postings: postings
				.into_iter()
				.map(|(posting, application_count)| EmployerPostingResponse {
					posting: PostingResponse::from(posting),
					application_count,
				})
				.collect(),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "Failed to list employer postings");
			internal_error::<PostingErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

/// Load a posting and verify the caller may manage it.
///
/// Owners and admins pass; everyone else gets the ownership error. The
/// Err carries the ready-made response.
async fn load_owned_posting(
	state: &AppState,
	current_user: &wazeefa_server_auth::CurrentUser,
	posting_id: &PostingId,
	locale: &str,
) -> Result<Posting, axum::response::Response> {
	let posting = match state.posting_repo.find_by_id(posting_id).await {
		Ok(Some(posting)) => posting,
		Ok(None) => {
			return Err(
				not_found::<PostingErrorResponse>(t(locale, "posting.not_found")).into_response()
			);
		}
		Err(e) => {
			tracing::error!(error = %e, posting_id = %posting_id, "Failed to load posting");
			return Err(
				internal_error::<PostingErrorResponse>(t(locale, "api.internal_error"))
					.into_response(),
			);
		}
	};

	let is_owner = posting.employer_id == current_user.user.id;
	let is_admin = current_user.role() == Some(Role::Admin);
	if !is_owner && !is_admin {
		return Err(
			forbidden::<PostingErrorResponse>("not_owner", t(locale, "posting.not_owner"))
				.into_response(),
		);
	}

	Ok(posting)
}
