use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::app_data::AppData;
use crate::errors::{ApiError, FieldError};
use crate::services::TokenService;
use crate::stores::issue_store::{IssueFilter, IssuePatch, NewIssue};
use crate::stores::IssueStore;
use crate::types::db::issue::{IssuePriority, IssueStatus};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::issues::{
    CreateIssueRequest, IssueCreatedApiResponse, IssueListResponse, IssueResponse,
    IssueStatsResponse, UpdateIssueRequest,
};

/// Issue management API endpoints; every route requires a bearer token.
pub struct IssueApi {
    issue_store: Arc<IssueStore>,
    token_service: Arc<TokenService>,
    dev_mode: bool,
}

#[derive(Tags)]
enum IssueTags {
    /// Issue management endpoints
    Issues,
}

impl IssueApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            issue_store: app_data.issue_store.clone(),
            token_service: app_data.token_service.clone(),
            dev_mode: app_data.settings.is_development(),
        }
    }

    /// Gate for protected operations; resolves the issuing user's id.
    fn authorize(&self, auth: &BearerAuth) -> Result<i32, ApiError> {
        self.token_service
            .authorize(&auth.0.token)
            .map_err(ApiError::from_token)
    }

    fn validate_create(body: &CreateIssueRequest) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if body.title.trim().is_empty() {
            errors.push(FieldError {
                field: "title".to_string(),
                message: "Title is required".to_string(),
            });
        }
        if body.description.trim().is_empty() {
            errors.push(FieldError {
                field: "description".to_string(),
                message: "Description is required".to_string(),
            });
        }
        errors
    }

    fn validate_update(body: &UpdateIssueRequest) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if matches!(body.title.as_deref(), Some(t) if t.trim().is_empty()) {
            errors.push(FieldError {
                field: "title".to_string(),
                message: "Title cannot be empty".to_string(),
            });
        }
        if matches!(body.description.as_deref(), Some(d) if d.trim().is_empty()) {
            errors.push(FieldError {
                field: "description".to_string(),
                message: "Description cannot be empty".to_string(),
            });
        }
        errors
    }
}

#[OpenApi(prefix_path = "/issues")]
impl IssueApi {
    /// List issues, most recent first, with filtering and pagination
    #[oai(path = "/", method = "get", tag = "IssueTags::Issues")]
    #[allow(clippy::too_many_arguments)]
    async fn list(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
        status: Query<Option<IssueStatus>>,
        priority: Query<Option<IssuePriority>>,
        search: Query<Option<String>>,
    ) -> Result<Json<IssueListResponse>, ApiError> {
        self.authorize(&auth)?;

        let filter = IssueFilter {
            page: page.0,
            limit: limit.0,
            status: status.0,
            priority: priority.0,
            search: search.0,
            created_by: None,
        };

        let page = self
            .issue_store
            .list(&filter)
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        Ok(Json(IssueListResponse {
            issues: page
                .issues
                .into_iter()
                .map(IssueResponse::list_item)
                .collect(),
            total: page.total,
            page: page.page,
            total_pages: page.total_pages,
        }))
    }

    /// Aggregate issue counts per status
    #[oai(path = "/stats", method = "get", tag = "IssueTags::Issues")]
    async fn stats(&self, auth: BearerAuth) -> Result<Json<IssueStatsResponse>, ApiError> {
        self.authorize(&auth)?;

        let counts = self
            .issue_store
            .status_counts(None)
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        Ok(Json(counts.into()))
    }

    /// Fetch a single issue with its creator
    #[oai(path = "/:id", method = "get", tag = "IssueTags::Issues")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<IssueResponse>, ApiError> {
        self.authorize(&auth)?;

        let issue = self
            .issue_store
            .get(id.0)
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        Ok(Json(issue.into()))
    }

    /// Create an issue owned by the authenticated user
    #[oai(path = "/", method = "post", tag = "IssueTags::Issues")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateIssueRequest>,
    ) -> Result<IssueCreatedApiResponse, ApiError> {
        let user_id = self.authorize(&auth)?;

        let errors = Self::validate_create(&body);
        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        let body = body.0;
        let id = self
            .issue_store
            .create(
                NewIssue {
                    title: body.title.trim().to_string(),
                    description: body.description.trim().to_string(),
                    status: body.status,
                    priority: body.priority,
                    severity: body.severity,
                },
                user_id,
            )
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        tracing::info!(issue_id = id, user_id, "issue created");

        let issue = self
            .issue_store
            .get(id)
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        Ok(IssueCreatedApiResponse::Created(Json(issue.into())))
    }

    /// Update issue fields in place; omitted fields keep their stored value
    #[oai(path = "/:id", method = "put", tag = "IssueTags::Issues")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<UpdateIssueRequest>,
    ) -> Result<Json<IssueResponse>, ApiError> {
        self.authorize(&auth)?;

        let errors = Self::validate_update(&body);
        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        let body = body.0;
        let patch = IssuePatch {
            title: body.title.map(|t| t.trim().to_string()),
            description: body.description.map(|d| d.trim().to_string()),
            status: body.status,
            priority: body.priority,
            severity: body.severity,
        };

        self.issue_store
            .update(id.0, patch)
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        let issue = self
            .issue_store
            .get(id.0)
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        Ok(Json(issue.into()))
    }

    /// Delete an issue
    #[oai(path = "/:id", method = "delete", tag = "IssueTags::Issues")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        self.authorize(&auth)?;

        self.issue_store
            .delete(id.0)
            .await
            .map_err(|e| ApiError::from_store(e, self.dev_mode))?;

        tracing::info!(issue_id = id.0, "issue deleted");

        Ok(Json(MessageResponse {
            message: "Issue deleted successfully".to_string(),
        }))
    }
}
