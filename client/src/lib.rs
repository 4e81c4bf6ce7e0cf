//! Typed gateway for the Bugtrail REST API.
//!
//! Mirrors the server's JSON surface one-to-one. Every call attaches the
//! bearer token when one is present; error responses are funnelled through
//! [`ClientError`] so callers handle a 401 the same way everywhere.

pub mod session;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the token; the caller should clear the session.
    #[error("session expired or not logged in")]
    Unauthorized,

    /// Non-success response; carries the server's `message` field.
    #[error("{0}")]
    Api(String),

    #[error("no response from server: {0}")]
    Network(#[from] reqwest::Error),
}

/// Public user fields plus the session token, as returned by register/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub severity: String,
    pub created_by: i32,
    pub creator_name: Option<String>,
    #[serde(default)]
    pub creator_email: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuePage {
    pub issues: Vec<Issue>,
    pub total: u64,
    pub page: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueStats {
    #[serde(rename = "Open")]
    pub open: u64,
    #[serde(rename = "In Progress")]
    pub in_progress: u64,
    #[serde(rename = "Resolved")]
    pub resolved: u64,
    #[serde(rename = "Closed")]
    pub closed: u64,
}

/// Fields sent on issue create/update; `None` fields are omitted from the
/// body so the server keeps the stored value.
#[derive(Debug, Default, Clone, Serialize)]
pub struct IssueDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl IssueDraft {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.severity.is_none()
    }
}

/// Query parameters for the issue listing.
#[derive(Debug, Default, Clone)]
pub struct ListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// Client API gateway: issues the REST calls with an attached bearer token
/// and centralizes error handling.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn handle<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            let message = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_else(|| format!("unexpected error (HTTP {})", status.as_u16()));
            return Err(ClientError::Api(message));
        }

        Ok(resp.json().await?)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, ClientError> {
        let resp = self
            .request(Method::POST, "/auth/register")
            .json(&serde_json::json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        Self::handle(resp).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, ClientError> {
        let resp = self
            .request(Method::POST, "/auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::handle(resp).await
    }

    pub async fn me(&self) -> Result<UserRecord, ClientError> {
        let resp = self.request(Method::GET, "/auth/me").send().await?;
        Self::handle(resp).await
    }

    pub async fn list_issues(&self, params: &ListParams) -> Result<IssuePage, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = params.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = params.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(status) = &params.status {
            query.push(("status", status.clone()));
        }
        if let Some(priority) = &params.priority {
            query.push(("priority", priority.clone()));
        }
        if let Some(search) = &params.search {
            query.push(("search", search.clone()));
        }

        let resp = self
            .request(Method::GET, "/issues")
            .query(&query)
            .send()
            .await?;
        Self::handle(resp).await
    }

    pub async fn get_issue(&self, id: i32) -> Result<Issue, ClientError> {
        let resp = self
            .request(Method::GET, &format!("/issues/{id}"))
            .send()
            .await?;
        Self::handle(resp).await
    }

    pub async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue, ClientError> {
        let resp = self
            .request(Method::POST, "/issues")
            .json(draft)
            .send()
            .await?;
        Self::handle(resp).await
    }

    pub async fn update_issue(&self, id: i32, draft: &IssueDraft) -> Result<Issue, ClientError> {
        let resp = self
            .request(Method::PUT, &format!("/issues/{id}"))
            .json(draft)
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// Returns the server's confirmation message.
    pub async fn delete_issue(&self, id: i32) -> Result<String, ClientError> {
        let resp = self
            .request(Method::DELETE, &format!("/issues/{id}"))
            .send()
            .await?;
        let body: MessageBody = Self::handle(resp).await?;
        Ok(body.message)
    }

    pub async fn stats(&self) -> Result<IssueStats, ClientError> {
        let resp = self.request(Method::GET, "/issues/stats").send().await?;
        Self::handle(resp).await
    }
}
