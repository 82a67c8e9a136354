// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wazeefa_server_db::Message;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A message in an application's conversation thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MessageResponse {
	pub id: String,
	pub application_id: String,
	pub sender_id: String,
	pub body: String,
	pub read: bool,
	pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
	fn from(message: Message) -> Self {
		let read = message.is_read();
		Self {
			id: message.id.to_string(),
			application_id: message.application_id.to_string(),
			sender_id: message.sender_id.to_string(),
			body: message.body,
			read,
			created_at: message.created_at,
		}
	}
}

/// The conversation thread, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListMessagesResponse {
	pub messages: Vec<MessageResponse>,
}

/// Request to post a message into an application's thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SendMessageRequest {
	pub body: String,
}

/// Error response for message operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MessageErrorResponse {
	pub error: String,
	pub message: String,
}
