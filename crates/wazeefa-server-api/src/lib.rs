// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod admin;
pub mod applications;
pub mod auth;
pub mod dashboard;
pub mod locale;
pub mod messages;
pub mod postings;
pub mod profile;

pub use admin::{
	AdminAccountResponse, AdminErrorResponse, AdminSuccessResponse, UserListQuery,
	UserListResponse, PortalStatsResponse, UpdateRoleRequest,
};
pub use applications::{
	ApplicationErrorResponse, ApplicationResponse, ApplicationSuccessResponse,
	EmployeeApplicationResponse, ListEmployeeApplicationsResponse,
	ListPostingApplicationsResponse, PostingApplicationResponse, SubmitApplicationRequest,
	UpdateApplicationStatusRequest,
};
pub use auth::{
	AuthErrorResponse, AuthSuccessResponse, AuthUserResponse, LoginRequest, LoginResponse,
	MeResponse, RegisterRequest,
};
pub use dashboard::{
	AdminDashboard, DashboardErrorResponse, DashboardResponse, EmployeeDashboard,
	EmployerDashboard,
};
pub use locale::{AvailableLocaleResponse, LocaleResponse, SetLocaleRequest, SetLocaleResponse};
pub use messages::{
	ListMessagesResponse, MessageErrorResponse, MessageResponse, SendMessageRequest,
};
pub use postings::{
	CreatePostingRequest, EmployerPostingResponse, ListEmployerPostingsResponse,
	ListPostingsResponse, PostingDetailResponse, PostingErrorResponse, PostingResponse,
	PostingSuccessResponse, SearchPostingsParams, UpdatePostingRequest,
};
pub use profile::{
	EmployeeProfileResponse, EmployerProfileResponse, ProfileErrorResponse, ProfileResponse,
	ProfileSuccessResponse, UpsertEmployeeProfileRequest, UpsertEmployerProfileRequest,
};
