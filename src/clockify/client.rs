use super::model::{ProjectDto, TimeEntryDto, UserDto, WorkspaceDto, into_raw_entries};
use crate::config::ClockifyConfig;
use crate::core::TimeTrackingSource;
use crate::errors::{AppError, AppResult};
use crate::http::{TIMEOUT, ensure_success};
use crate::models::{Project, RawEntry};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Largest page the API accepts.
pub const PAGE_SIZE: usize = 5000;

pub struct ClockifyClient {
    http: reqwest::Client,
    base_url: String,
    workspace_id: String,
    user_id: String,
}

impl ClockifyClient {
    pub fn new(cfg: &ClockifyConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(cfg.api_key.trim())
            .map_err(|e| AppError::Config(format!("invalid clockify.api_key: {e}")))?;
        headers.insert("X-Api-Key", key);

        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            workspace_id: cfg.workspace_id.clone(),
            user_id: cfg.user_id.clone(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "clockify GET");

        let resp = self.http.get(&url).query(query).send().await?;
        let resp = ensure_success(resp).await.map_err(|e| match e {
            AppError::Api { status: 401, message } => AppError::Api {
                status: 401,
                message: format!("{message} (check CLOCKIFY_API_KEY)"),
            },
            other => other,
        })?;

        Ok(resp.json().await?)
    }

    /// Walk `page=1..` until a short page comes back.
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let mut out = Vec::new();
        let mut page = 1usize;

        loop {
            let mut q = query.to_vec();
            q.push(("page", page.to_string()));
            q.push(("page-size", PAGE_SIZE.to_string()));

            let batch: Vec<T> = self.get(path, &q).await?;
            let n = batch.len();
            out.extend(batch);

            if n < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(out)
    }

    /// Owner of the API key.
    pub async fn current_user(&self) -> AppResult<UserDto> {
        self.get("/user", &[]).await
    }

    pub async fn workspaces(&self) -> AppResult<Vec<WorkspaceDto>> {
        self.get("/workspaces", &[]).await
    }

    /// Workspace member lookup; needs `workspace_id`.
    pub async fn find_user_by_email(&self, email: &str) -> AppResult<Option<UserDto>> {
        let path = format!("/workspaces/{}/users", self.workspace_id);
        let users: Vec<UserDto> = self.get(&path, &[("email", email.to_string())]).await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }
}

fn iso(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl TimeTrackingSource for ClockifyClient {
    async fn fetch_entries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RawEntry>> {
        let path = format!(
            "/workspaces/{}/user/{}/time-entries",
            self.workspace_id, self.user_id
        );
        let dtos: Vec<TimeEntryDto> = self
            .get_all(&path, &[("start", iso(start)), ("end", iso(end))])
            .await?;
        debug!(count = dtos.len(), "time entries fetched");

        Ok(into_raw_entries(dtos))
    }

    async fn fetch_projects(&self) -> AppResult<Vec<Project>> {
        let path = format!("/workspaces/{}/projects", self.workspace_id);
        let dtos: Vec<ProjectDto> = self.get_all(&path, &[]).await?;
        Ok(dtos.into_iter().map(Project::from).collect())
    }
}
