//! Plain document fetches: the public menu and the local fallback copy.

use chrono::Utc;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::MenuDocument;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Failed to read {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("Invalid menu JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a menu document is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url(String),
    Path(PathBuf),
}

impl DocumentSource {
    /// Interprets `http://` and `https://` locations as URLs, anything
    /// else as a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DocumentSource::Url(location.to_string())
        } else {
            DocumentSource::Path(PathBuf::from(location))
        }
    }

    /// Fetches the freshest copy of the document.
    ///
    /// URLs get a timestamp query parameter and no-store headers so no
    /// cache along the way can answer the request.
    pub async fn fetch(&self) -> Result<MenuDocument, SourceError> {
        match self {
            DocumentSource::Url(url) => {
                let response = reqwest::Client::new()
                    .get(url)
                    .query(&[("t", Utc::now().timestamp_millis().to_string())])
                    .header(reqwest::header::CACHE_CONTROL, "no-store")
                    .header(reqwest::header::PRAGMA, "no-cache")
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(SourceError::Status(response.status().as_u16()));
                }

                let text = response.text().await?;
                Ok(MenuDocument::from_json(&text)?)
            }
            DocumentSource::Path(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| SourceError::Io(path.clone(), e))?;
                Ok(MenuDocument::from_json(&text)?)
            }
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Url(url) => write!(f, "{}", url),
            DocumentSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::HeaderMap, routing::get, Router};
    use std::collections::HashMap;
    use tempfile::tempdir;

    const MENU: &str = r#"{"categories": [{"id": "a", "name": {"de": "Suppen"}, "items": []}]}"#;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            DocumentSource::parse("https://example.com/menu.json"),
            DocumentSource::Url("https://example.com/menu.json".into())
        );
        assert_eq!(
            DocumentSource::parse("./menu.json"),
            DocumentSource::Path(PathBuf::from("./menu.json"))
        );
    }

    #[tokio::test]
    async fn test_fetch_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("menu.json");
        std::fs::write(&path, MENU).unwrap();

        let doc = DocumentSource::Path(path).fetch().await.unwrap();
        assert_eq!(doc.categories[0].id, "a");
    }

    #[tokio::test]
    async fn test_fetch_missing_path_is_io_error() {
        let dir = tempdir().unwrap();
        let result = DocumentSource::Path(dir.path().join("missing.json"))
            .fetch()
            .await;
        assert!(matches!(result, Err(SourceError::Io(_, _))));
    }

    #[tokio::test]
    async fn test_fetch_url_bypasses_cache() {
        let app = Router::new().route(
            "/menu.json",
            get(
                |Query(params): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                    let no_store = headers
                        .get("cache-control")
                        .map(|v| v == "no-store")
                        .unwrap_or(false);
                    if params.contains_key("t") && no_store {
                        (axum::http::StatusCode::OK, MENU.to_string())
                    } else {
                        (axum::http::StatusCode::BAD_REQUEST, String::new())
                    }
                },
            ),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let doc = DocumentSource::Url(format!("http://{}/menu.json", addr))
            .fetch()
            .await
            .unwrap();
        assert_eq!(doc.categories.len(), 1);

        let missing = DocumentSource::Url(format!("http://{}/nothing.json", addr))
            .fetch()
            .await;
        assert!(matches!(missing, Err(SourceError::Status(404))));
    }
}
