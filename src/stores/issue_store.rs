use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::errors::StoreError;
use crate::types::db::issue::{self, Entity as Issue, IssuePriority, IssueSeverity, IssueStatus};
use crate::types::db::user;

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Listing filters; all criteria are AND-combined.
#[derive(Debug, Default, Clone)]
pub struct IssueFilter {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Page size, defaults to [`DEFAULT_PAGE_SIZE`]
    pub limit: Option<u64>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    /// Substring match against title or description
    pub search: Option<String>,
    pub created_by: Option<i32>,
}

/// Issue row left-joined with its creator.
#[derive(Debug, FromQueryResult)]
pub struct IssueWithCreator {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub severity: IssueSeverity,
    pub created_by: i32,
    pub created_at: i64,
    pub updated_at: i64,
    pub creator_name: Option<String>,
    pub creator_email: Option<String>,
}

#[derive(Debug)]
pub struct IssuePage {
    pub issues: Vec<IssueWithCreator>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

/// Fields for issue creation; classification fields fall back to their
/// entity defaults (Open/Medium/Major).
#[derive(Debug, Default)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub severity: Option<IssueSeverity>,
}

/// Field-level patch; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct IssuePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub severity: Option<IssueSeverity>,
}

/// Issue count per status with zero defaults.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub closed: u64,
}

#[derive(FromQueryResult)]
struct StatusCountRow {
    status: IssueStatus,
    count: i64,
}

/// IssueStore persists issue records and serves the filtered, paginated
/// listing plus the status aggregation.
pub struct IssueStore {
    db: DatabaseConnection,
}

impl IssueStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filter_condition(filter: &IssueFilter) -> Condition {
        let mut cond = Condition::all();

        if let Some(status) = filter.status {
            cond = cond.add(issue::Column::Status.eq(status));
        }
        if let Some(priority) = filter.priority {
            cond = cond.add(issue::Column::Priority.eq(priority));
        }
        if let Some(created_by) = filter.created_by {
            cond = cond.add(issue::Column::CreatedBy.eq(created_by));
        }
        if let Some(search) = filter.search.as_deref() {
            if !search.is_empty() {
                cond = cond.add(
                    Condition::any()
                        .add(issue::Column::Title.contains(search))
                        .add(issue::Column::Description.contains(search)),
                );
            }
        }

        cond
    }

    /// List one page of issues, most recent first. The id tiebreaker keeps
    /// ordering stable for rows created within the same second.
    pub async fn list(&self, filter: &IssueFilter) -> Result<IssuePage, StoreError> {
        let page = filter.page.unwrap_or(1).max(1);
        let limit = filter.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        // Guard against overflow, and keep the offset a valid signed SQL
        // integer for any parseable page value.
        let offset = (page - 1).saturating_mul(limit).min(i64::MAX as u64);
        let cond = Self::filter_condition(filter);

        let total = Issue::find()
            .filter(cond.clone())
            .count(&self.db)
            .await
            .map_err(|e| StoreError::database("count_issues", e))?;

        let issues = Issue::find()
            .filter(cond)
            .join(JoinType::LeftJoin, issue::Relation::User.def())
            .column_as(user::Column::Name, "creator_name")
            .column_as(user::Column::Email, "creator_email")
            .order_by_desc(issue::Column::CreatedAt)
            .order_by_desc(issue::Column::Id)
            .offset(offset)
            .limit(limit)
            .into_model::<IssueWithCreator>()
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_issues", e))?;

        Ok(IssuePage {
            issues,
            total,
            page,
            total_pages: total.div_ceil(limit),
        })
    }

    pub async fn get(&self, id: i32) -> Result<IssueWithCreator, StoreError> {
        Issue::find_by_id(id)
            .join(JoinType::LeftJoin, issue::Relation::User.def())
            .column_as(user::Column::Name, "creator_name")
            .column_as(user::Column::Email, "creator_email")
            .into_model::<IssueWithCreator>()
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("get_issue", e))?
            .ok_or(StoreError::IssueNotFound)
    }

    /// Insert a new issue for the given creator and return its generated id.
    pub async fn create(&self, data: NewIssue, created_by: i32) -> Result<i32, StoreError> {
        let now = Utc::now().timestamp();

        let new_issue = issue::ActiveModel {
            title: Set(data.title),
            description: Set(data.description),
            status: Set(data.status.unwrap_or_default()),
            priority: Set(data.priority.unwrap_or_default()),
            severity: Set(data.severity.unwrap_or_default()),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = new_issue
            .insert(&self.db)
            .await
            .map_err(|e| StoreError::database("insert_issue", e))?;

        Ok(inserted.id)
    }

    /// Apply a partial update in place; absent fields keep their prior value.
    pub async fn update(&self, id: i32, patch: IssuePatch) -> Result<(), StoreError> {
        let existing = Issue::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("get_issue", e))?
            .ok_or(StoreError::IssueNotFound)?;

        let mut active: issue::ActiveModel = existing.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        if let Some(priority) = patch.priority {
            active.priority = Set(priority);
        }
        if let Some(severity) = patch.severity {
            active.severity = Set(severity);
        }
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| StoreError::database("update_issue", e))?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = Issue::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::database("delete_issue", e))?;

        if result.rows_affected == 0 {
            return Err(StoreError::IssueNotFound);
        }

        Ok(())
    }

    /// Count issues per status, optionally scoped to one creator. Statuses
    /// with no issues come back as zero.
    pub async fn status_counts(
        &self,
        created_by: Option<i32>,
    ) -> Result<StatusCounts, StoreError> {
        let mut query = Issue::find()
            .select_only()
            .column(issue::Column::Status)
            .column_as(issue::Column::Id.count(), "count")
            .group_by(issue::Column::Status);

        if let Some(creator) = created_by {
            query = query.filter(issue::Column::CreatedBy.eq(creator));
        }

        let rows = query
            .into_model::<StatusCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("count_issues_by_status", e))?;

        let mut counts = StatusCounts::default();
        for row in rows {
            let count = row.count.max(0) as u64;
            match row.status {
                IssueStatus::Open => counts.open = count,
                IssueStatus::InProgress => counts.in_progress = count,
                IssueStatus::Resolved => counts.resolved = count,
                IssueStatus::Closed => counts.closed = count,
            }
        }

        Ok(counts)
    }
}
