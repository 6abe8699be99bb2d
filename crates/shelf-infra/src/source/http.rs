use std::io::Cursor;

use async_trait::async_trait;
use shelf_core::ports::{AssetSourcePort, AssetStream, MaterializationError};
use tracing::debug;

/// Fetches `http(s)://` locators.
///
/// The body is buffered before it is handed to the vault; clipboard images are
/// small and the vault still writes through its staging file.
#[derive(Debug, Clone, Default)]
pub struct HttpAssetSource {
    client: reqwest::Client,
}

impl HttpAssetSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn unavailable(locator: &str, err: reqwest::Error) -> MaterializationError {
    MaterializationError::SourceUnavailable {
        locator: locator.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl AssetSourcePort for HttpAssetSource {
    async fn open(&self, locator: &str) -> Result<AssetStream, MaterializationError> {
        let response = self
            .client
            .get(locator)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| unavailable(locator, e))?;

        let body = response.bytes().await.map_err(|e| unavailable(locator, e))?;
        debug!(locator = %locator, size_bytes = body.len(), "Fetched remote asset");

        Ok(Box::new(Cursor::new(body.to_vec())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn fetches_body_of_successful_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/shot.png")
            .with_status(200)
            .with_body(b"\x89PNG\r\n\x1a\nrest")
            .create_async()
            .await;

        let mut stream = HttpAssetSource::default()
            .open(&format!("{}/shot.png", server.url()))
            .await
            .expect("open");
        let mut body = Vec::new();
        stream.read_to_end(&mut body).await.unwrap();

        mock.assert_async().await;
        assert_eq!(body, b"\x89PNG\r\n\x1a\nrest");
    }

    #[tokio::test]
    async fn error_status_is_source_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/gone.png")
            .with_status(404)
            .create_async()
            .await;

        let err = HttpAssetSource::default()
            .open(&format!("{}/gone.png", server.url()))
            .await
            .err()
            .expect("404 should fail");

        assert!(matches!(err, MaterializationError::SourceUnavailable { .. }));
    }
}
