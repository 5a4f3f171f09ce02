use crate::domain::error::DomainError;
use crate::domain::values::request_options::RequestOptions;

/// A single HTTP GET returning a decoded JSON body.
///
/// Implementations classify failures: non-2xx statuses via
/// [`DomainError::from_status`], connection problems as
/// [`DomainError::Transport`], unparseable bodies as [`DomainError::Decode`].
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get_json(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, DomainError>;
}
