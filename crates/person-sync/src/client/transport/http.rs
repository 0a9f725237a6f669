//! HTTP transport using reqwest.

use super::{PersonTransport, TransportError};
use crate::config::DEFAULT_API_PREFIX;
use crate::model::{Person, PersonFields, PersonId};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Talks to a person server over HTTP.
///
/// ```rust,no_run
/// use person_sync::client::transport::{HttpTransport, PersonTransport};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new("http://127.0.0.1:3000");
/// let persons = transport.list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_prefix: String,
}

impl HttpTransport {
    /// Creates a transport for the server at `base_url` (scheme, host and port).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }

    /// Sets the path the collection is mounted at.
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.api_prefix)
    }

    fn item_url(&self, id: PersonId) -> String {
        format!("{}{}/{}", self.base_url, self.api_prefix, id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(TransportError::rejected(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, TransportError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PersonTransport for HttpTransport {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Person>, TransportError> {
        self.send_json(self.client.get(self.collection_url())).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: PersonId) -> Result<Person, TransportError> {
        self.send_json(self.client.get(self.item_url(id))).await
    }

    #[instrument(skip(self))]
    async fn create(&self, fields: &PersonFields) -> Result<Person, TransportError> {
        self.send_json(self.client.post(self.collection_url()).json(fields))
            .await
    }

    #[instrument(skip(self), fields(id = %person.id))]
    async fn update(&self, person: &Person) -> Result<Person, TransportError> {
        self.send_json(self.client.put(self.item_url(person.id)).json(person))
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PersonId) -> Result<(), TransportError> {
        self.send(self.client.delete(self.item_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_prefix() {
        let transport = HttpTransport::new("http://localhost:3000/").with_api_prefix("/people");
        assert_eq!(transport.collection_url(), "http://localhost:3000/people");
        assert_eq!(transport.item_url(PersonId(4)), "http://localhost:3000/people/4");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(format!("http://{addr}"));
        let result = transport.list().await;
        assert!(matches!(result, Err(TransportError::Network(_))));
    }
}
