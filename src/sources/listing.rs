//! Plain HTTP fetcher for conference listing pages.

use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

use crate::sources::{ListingSource, SourceError};
use crate::utils::HttpClient;

/// Downloads listing pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpListingSource {
    client: Arc<HttpClient>,
}

impl HttpListingSource {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch_page(&self, url: &str) -> Result<String, SourceError> {
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceError::InvalidRequest(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let response = self.client.get(parsed.as_str()).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> HttpListingSource {
        HttpListingSource::new(Arc::new(HttpClient::new().unwrap()))
    }

    #[tokio::test]
    async fn test_fetch_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/accepted")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>ok</body></html>")
            .create_async()
            .await;

        let body = source()
            .fetch_page(&format!("{}/accepted", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(body.contains("ok"));
    }

    #[tokio::test]
    async fn test_fetch_page_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let result = source()
            .fetch_page(&format!("{}/missing", server.url()))
            .await;
        assert!(matches!(result, Err(SourceError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_rejects_bad_urls() {
        let result = source().fetch_page("not a url").await;
        assert!(matches!(result, Err(SourceError::InvalidRequest(_))));

        let result = source().fetch_page("ftp://example.org/papers").await;
        assert!(matches!(result, Err(SourceError::InvalidRequest(_))));
    }
}
