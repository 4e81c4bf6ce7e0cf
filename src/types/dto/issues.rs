use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::stores::issue_store::{IssueWithCreator, StatusCounts};
use crate::types::db::issue::{IssuePriority, IssueSeverity, IssueStatus};

/// Request model for issue creation
#[derive(Object, Debug)]
pub struct CreateIssueRequest {
    pub title: String,
    pub description: String,
    /// Defaults to Open
    pub status: Option<IssueStatus>,
    /// Defaults to Medium
    pub priority: Option<IssuePriority>,
    /// Defaults to Major
    pub severity: Option<IssueSeverity>,
}

/// Field-level partial update; omitted fields keep their stored value
#[derive(Object, Debug, Default)]
pub struct UpdateIssueRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub severity: Option<IssueSeverity>,
}

/// Issue record joined with its creator
#[derive(Object, Debug)]
pub struct IssueResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub severity: IssueSeverity,
    pub created_by: i32,
    pub creator_name: Option<String>,
    /// Only populated on single-issue reads
    #[oai(skip_serializing_if_is_none)]
    pub creator_email: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl IssueResponse {
    /// List rows only carry the creator name, matching the list query shape.
    pub fn list_item(row: IssueWithCreator) -> Self {
        let mut item = Self::from(row);
        item.creator_email = None;
        item
    }
}

impl From<IssueWithCreator> for IssueResponse {
    fn from(row: IssueWithCreator) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            severity: row.severity,
            created_by: row.created_by,
            creator_name: row.creator_name,
            creator_email: row.creator_email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One page of issues plus pagination metadata
#[derive(Object, Debug)]
pub struct IssueListResponse {
    pub issues: Vec<IssueResponse>,
    pub total: u64,
    pub page: u64,
    #[oai(rename = "totalPages")]
    pub total_pages: u64,
}

/// Issue count per status, all four statuses always present
#[derive(Object, Debug)]
pub struct IssueStatsResponse {
    #[oai(rename = "Open")]
    pub open: u64,
    #[oai(rename = "In Progress")]
    pub in_progress: u64,
    #[oai(rename = "Resolved")]
    pub resolved: u64,
    #[oai(rename = "Closed")]
    pub closed: u64,
}

impl From<StatusCounts> for IssueStatsResponse {
    fn from(counts: StatusCounts) -> Self {
        Self {
            open: counts.open,
            in_progress: counts.in_progress,
            resolved: counts.resolved,
            closed: counts.closed,
        }
    }
}

/// API response for issue creation
#[derive(ApiResponse)]
pub enum IssueCreatedApiResponse {
    /// Issue stored, returned with creator fields
    #[oai(status = 201)]
    Created(Json<IssueResponse>),
}
