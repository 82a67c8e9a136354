// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application message thread HTTP handlers.
//!
//! Each application carries one thread between the applicant and the
//! posting's employer. Fetching the thread marks the other side's
//! messages as read for the caller.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};

use wazeefa_server_auth::{ApplicationId, MessageId, Role};
use wazeefa_server_db::Message;

pub use wazeefa_server_api::messages::*;

use crate::{
	api::AppState,
	api_response::{bad_request, forbidden, internal_error, not_found},
	auth_middleware::RequireAuth,
	i18n::{caller_locale, t},
	error_body, require_id,
	validation::parse_application_id,
};

error_body!(MessageErrorResponse);

#[utoipa::path(
    get,
    path = "/api/applications/{id}/messages",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Thread messages, oldest first", body = ListMessagesResponse),
        (status = 403, description = "Not a party to this application", body = MessageErrorResponse),
        (status = 404, description = "Application not found", body = MessageErrorResponse)
    ),
    tag = "messages"
)]
/// GET /api/applications/{id}/messages - Read the thread.
pub async fn list_messages(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(application_id): Path<String>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let application_id = require_id!(
		MessageErrorResponse,
		parse_application_id(&application_id, &t(locale, "api.invalid_id"))
	);

	if let Err(response) = require_party(&state, &current_user, &application_id, locale).await {
		return response;
	}

	// Opening the thread counts as reading it. A failure here must not
	// hide the messages themselves.
	if let Err(e) = state
		.message_repo
		.mark_read(&application_id, &current_user.user.id)
		.await
	{
		tracing::warn!(error = %e, application_id = %application_id, "Failed to mark messages read");
	}

	match state
		.message_repo
		.list_for_application(&application_id)
		.await
	{
		Ok(messages) => Json(ListMessagesResponse {
			messages: messages.into_iter().map(MessageResponse::from).collect(),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, application_id = %application_id, "Failed to list messages");
			internal_error::<MessageErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/messages",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = MessageResponse),
        (status = 400, description = "Empty message body", body = MessageErrorResponse),
        (status = 403, description = "Not a party to this application", body = MessageErrorResponse),
        (status = 404, description = "Application not found", body = MessageErrorResponse)
    ),
    tag = "messages"
)]
/// POST /api/applications/{id}/messages - Send a message on the thread.
pub async fn send_message(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
	Path(application_id): Path<String>,
	Json(payload): Json<SendMessageRequest>,
) -> impl IntoResponse {
	let locale = caller_locale(&current_user, &state.default_locale);
	let application_id = require_id!(
		MessageErrorResponse,
		parse_application_id(&application_id, &t(locale, "api.invalid_id"))
	);

	let body = payload.body.trim();
	if body.is_empty() {
		return bad_request::<MessageErrorResponse>("empty_message", t(locale, "message.empty"))
			.into_response();
	}

	if let Err(response) = require_party(&state, &current_user, &application_id, locale).await {
		return response;
	}

	let message = Message {
		id: MessageId::generate(),
		application_id,
		sender_id: current_user.user.id,
		body: body.to_string(),
		read_at: None,
		created_at: chrono::Utc::now(),
	};

	match state.message_repo.insert(&message).await {
		Ok(()) => (StatusCode::CREATED, Json(MessageResponse::from(message))).into_response(),
		Err(e) => {
			tracing::error!(error = %e, application_id = %message.application_id, "Failed to send message");
			internal_error::<MessageErrorResponse>(t(locale, "api.internal_error")).into_response()
		}
	}
}

/// Loads the application and checks the caller is the applicant, the
/// posting's employer, or an admin.
async fn require_party(
	state: &AppState,
	current_user: &wazeefa_server_auth::CurrentUser,
	application_id: &ApplicationId,
	locale: &str,
) -> Result<(), Response> {
	let application = match state.application_repo.find_by_id(application_id).await {
		Ok(Some(application)) => application,
		Ok(None) => {
			return Err(
				not_found::<MessageErrorResponse>(t(locale, "application.not_found"))
					.into_response(),
			);
		}
		Err(e) => {
			tracing::error!(error = %e, application_id = %application_id, "Failed to load application");
			return Err(
				internal_error::<MessageErrorResponse>(t(locale, "api.internal_error"))
					.into_response(),
			);
		}
	};

	if application.employee_id == current_user.user.id
		|| current_user.role() == Some(Role::Admin)
	{
		return Ok(());
	}

	let posting = match state.posting_repo.find_by_id(&application.posting_id).await {
		Ok(Some(posting)) => posting,
		Ok(None) => {
			return Err(
				not_found::<MessageErrorResponse>(t(locale, "application.not_found"))
					.into_response(),
			);
		}
		Err(e) => {
			tracing::error!(error = %e, posting_id = %application.posting_id, "Failed to load posting");
			return Err(
				internal_error::<MessageErrorResponse>(t(locale, "api.internal_error"))
					.into_response(),
			);
		}
	};

	if posting.employer_id == current_user.user.id {
		return Ok(());
	}

	Err(
		forbidden::<MessageErrorResponse>("not_party", t(locale, "application.not_party"))
			.into_response(),
	)
}
