use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::models::{Event, NewEvent};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/events";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid API url: {0}")]
    InvalidUrl(String),
}

/// The calls the map page makes against `/api/events`.
#[async_trait]
pub trait EventGateway: Send + Sync {
    async fn list(&self, topluluk: &str, q: &str) -> Result<Vec<Event>, ClientError>;

    async fn create(&self, event: &NewEvent) -> Result<(), ClientError>;

    async fn rename(&self, id: i64, name: &str) -> Result<(), ClientError>;

    async fn delete(&self, id: i64) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct HttpEventGateway {
    client: reqwest::Client,
    events_url: Url,
}

impl HttpEventGateway {
    /// `events_url` points at the collection, e.g. `http://127.0.0.1:8000/api/events`.
    pub fn new(events_url: &str) -> Result<Self, ClientError> {
        let events_url =
            Url::parse(events_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if events_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(events_url.to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            events_url,
        })
    }

    fn event_url(&self, id: i64) -> Result<Url, ClientError> {
        let mut url = self.events_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.events_url.to_string()))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

/// Turns non-2xx answers into `ClientError::Status`, keeping the server's
/// `{ error }` text when there is one.
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl EventGateway for HttpEventGateway {
    async fn list(&self, topluluk: &str, q: &str) -> Result<Vec<Event>, ClientError> {
        let mut url = self.events_url.clone();
        url.query_pairs_mut()
            .append_pair("topluluk", topluluk)
            .append_pair("q", q);

        let response = ensure_success(self.client.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, event: &NewEvent) -> Result<(), ClientError> {
        let request = self.client.post(self.events_url.clone()).json(event);
        ensure_success(request.send().await?).await?;
        Ok(())
    }

    async fn rename(&self, id: i64, name: &str) -> Result<(), ClientError> {
        let request = self
            .client
            .put(self.event_url(id)?)
            .json(&json!({ "etkinlik_name": name }));
        ensure_success(request.send().await?).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let request = self.client.delete(self.event_url(id)?);
        ensure_success(request.send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_url_appends_id() {
        let gateway = HttpEventGateway::new(DEFAULT_API_URL).unwrap();
        assert_eq!(
            gateway.event_url(42).unwrap().as_str(),
            "http://127.0.0.1:8000/api/events/42"
        );

        let gateway = HttpEventGateway::new("http://127.0.0.1:8000/api/events/").unwrap();
        assert_eq!(
            gateway.event_url(7).unwrap().as_str(),
            "http://127.0.0.1:8000/api/events/7"
        );
    }

    #[test]
    fn test_rejects_unusable_urls() {
        assert!(matches!(
            HttpEventGateway::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpEventGateway::new("mailto:events@example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
