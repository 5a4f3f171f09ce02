use crate::domain::error::DomainError;
use crate::domain::ports::http_transport::HttpTransport;
use crate::domain::values::request_options::RequestOptions;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

/// JSON-over-HTTPS transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// `timeout` is an optional per-call deadline. Without one a stalled
    /// call holds the scheduler until the connection gives up.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            client: builder.build().unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, DomainError> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&options.query)
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return Err(DomainError::from_status(status.as_u16(), reason));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| DomainError::Decode(e.to_string()))
    }
}
