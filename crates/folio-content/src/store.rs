use chrono::Utc;
use folio_schema::{PageVisit, Project, Skill};
use reqwest::{RequestBuilder, StatusCode};
use thiserror::Error;
use uuid::Uuid;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Content-store failures split the way callers branch on them: transport
/// errors mean the store was unreachable, status errors mean it answered
/// unhappily.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("content store unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("content store error ({code}): {body}")]
    Status { code: StatusCode, body: String },
}

/// Hosted content-store client (PostgREST-style REST under `/rest/v1`).
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl ContentClient {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token,
        }
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        builder.header("apikey", &self.anon_key).bearer_auth(bearer)
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let url = format!("{}/rest/v1/projects", self.base_url);
        let resp = self
            .authed(self.client.get(url))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, StoreError> {
        let url = format!("{}/rest/v1/skills", self.base_url);
        let resp = self
            .authed(self.client.get(url))
            .query(&[("select", "*"), ("order", "display_order.asc")])
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Append a `page_visits` row.
    pub async fn record_page_visit(
        &self,
        page_name: &str,
        user_id: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/page_visits", self.base_url);
        let row = PageVisit {
            page_name: page_name.to_string(),
            user_id,
            visited_at: Utc::now(),
        };
        let resp = self
            .authed(self.client.post(url))
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Exact visit count for one page, taken from the `content-range`
    /// response header (`items 0-0/123`).
    pub async fn count_page_visits(&self, page_name: &str) -> Result<u64, StoreError> {
        let url = format!("{}/rest/v1/page_visits", self.base_url);
        let resp = self
            .authed(self.client.get(url))
            .query(&[
                ("select", "page_name"),
                ("page_name", &format!("eq.{page_name}")),
            ])
            .header("Prefer", "count=exact")
            .header("Range", "0-0")
            .send()
            .await?;
        let range = resp
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        check_status(resp).await?;
        Ok(range.as_deref().and_then(parse_count).unwrap_or(0))
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let code = resp.status();
    if code.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Status { code, body })
}

fn parse_count(content_range: &str) -> Option<u64> {
    content_range.rsplit('/').next()?.trim().parse().ok()
}
