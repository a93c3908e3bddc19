use crate::backend::RowStore;
use crate::errors::BackendError;
use crate::models::{ClickRow, CounterId};
use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// `RowStore` over a PostgREST endpoint, as exposed by Supabase at `/rest/v1`.
pub struct RestBackend {
    client: Client,
    table_url: String,
    api_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountOnly {
    count: u64,
}

impl RestBackend {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        table: &str,
    ) -> Result<Self, BackendError> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(BackendError::MalformedRequest(format!(
                "backend url must be http(s): {base_url:?}"
            )));
        }
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            table_url: format!("{base}/rest/v1/{table}"),
            api_key: api_key.into(),
        })
    }

    fn request(&self, method: Method, query: &str) -> RequestBuilder {
        let url = if query.is_empty() {
            self.table_url.clone()
        } else {
            format!("{}?{query}", self.table_url)
        };
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
    let message = detail
        .message
        .unwrap_or_else(|| format!("{status}: {body}"));
    debug!(%status, code = ?detail.code, "backend returned an error");

    Err(BackendError::classify(
        status.as_u16(),
        detail.code.as_deref(),
        message,
    ))
}

#[async_trait]
impl RowStore for RestBackend {
    async fn select_all(&self) -> Result<Vec<ClickRow>, BackendError> {
        let response = self.request(Method::GET, "select=id,count").send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn select_count(&self, id: CounterId) -> Result<u64, BackendError> {
        let response = self
            .request(Method::GET, &format!("select=count&id=eq.{id}"))
            .header(header::ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;
        let row: CountOnly = check(response).await?.json().await?;
        Ok(row.count)
    }

    async fn insert(&self, row: ClickRow) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, "")
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn update_count(&self, id: CounterId, count: u64) -> Result<(), BackendError> {
        let response = self
            .request(Method::PATCH, &format!("id=eq.{id}"))
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!({ "count": count }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}
