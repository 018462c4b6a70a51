//! HTTP client for the menu storage proxy.
//!
//! Wire contract:
//! - `GET <endpoint>` returns `{"content": "<base64>", "sha": "<revision>"}`
//! - `POST <endpoint>` with `{"content": "<base64>", "sha": "<revision>"}`
//!   returns `{"content": {"sha": "<new revision>"}}`
//!
//! Both requests carry the admin password in the `X-Admin-Password` header.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::codec::{decode_document, encode_document};
use super::{Credential, GatewayError, Revision, Snapshot, StorageGateway};
use crate::models::MenuDocument;

/// Header carrying the admin password.
pub const PASSWORD_HEADER: &str = "X-Admin-Password";

#[derive(Debug, Deserialize)]
struct ReadResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    content: String,
    sha: &'a str,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Debug, Deserialize)]
struct WrittenContent {
    sha: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Storage gateway talking to the proxy endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Maps a non-success response to a gateway error.
    async fn failure(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => GatewayError::Auth,
            StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => GatewayError::Conflict,
            _ => {
                let body: ErrorBody = response.json().await.unwrap_or_default();
                GatewayError::Transport(format!(
                    "{}: {}",
                    status.as_u16(),
                    body.error.unwrap_or_else(|| "Request failed".to_string())
                ))
            }
        }
    }
}

impl StorageGateway for HttpGateway {
    async fn read(&self, credential: &Credential) -> Result<Snapshot, GatewayError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(PASSWORD_HEADER, credential.expose())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let body: ReadResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::transport(format!("Malformed response: {}", e)))?;

        Ok(Snapshot {
            document: decode_document(&body.content)?,
            revision: Revision::new(body.sha),
        })
    }

    async fn write(
        &self,
        credential: &Credential,
        document: &MenuDocument,
        expected: &Revision,
    ) -> Result<Revision, GatewayError> {
        let request = WriteRequest {
            content: encode_document(document)?,
            sha: expected.as_str(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(PASSWORD_HEADER, credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        let body: WriteResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::transport(format!("Malformed response: {}", e)))?;

        Ok(Revision::new(body.content.sha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, LocalizedText};
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Proxy {
        content: Arc<Mutex<(String, u64)>>,
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get(PASSWORD_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(|pw| pw == "secret")
            .unwrap_or(false)
    }

    async fn handle_get(State(proxy): State<Proxy>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"})));
        }
        let (content, rev) = proxy.content.lock().unwrap().clone();
        (StatusCode::OK, Json(json!({"content": content, "sha": format!("rev{}", rev)})))
    }

    async fn handle_post(
        State(proxy): State<Proxy>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"})));
        }
        let mut guard = proxy.content.lock().unwrap();
        if body["sha"] != format!("rev{}", guard.1) {
            return (StatusCode::CONFLICT, Json(json!({"error": "sha mismatch"})));
        }
        guard.0 = body["content"].as_str().unwrap_or_default().to_string();
        guard.1 += 1;
        (StatusCode::OK, Json(json!({"content": {"sha": format!("rev{}", guard.1)}})))
    }

    async fn spawn_proxy(document: &MenuDocument) -> String {
        let proxy = Proxy {
            content: Arc::new(Mutex::new((encode_document(document).unwrap(), 1))),
        };
        let app = Router::new()
            .route("/", get(handle_get).post(handle_post))
            .route(
                "/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"}))) }),
            )
            .with_state(proxy);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn sample() -> MenuDocument {
        MenuDocument::new(vec![Category::new("suppen", LocalizedText::new("Suppen"))])
    }

    #[tokio::test]
    async fn test_read_decodes_document() {
        let url = spawn_proxy(&sample()).await;
        let gateway = HttpGateway::new(format!("{}/", url));

        let snapshot = gateway.read(&Credential::new("secret")).await.unwrap();
        assert_eq!(snapshot.document, sample());
        assert_eq!(snapshot.revision, Revision::new("rev1"));
    }

    #[tokio::test]
    async fn test_read_wrong_password_is_auth_error() {
        let url = spawn_proxy(&sample()).await;
        let gateway = HttpGateway::new(format!("{}/", url));

        let err = gateway.read(&Credential::new("nope")).await.unwrap_err();
        assert_eq!(err, GatewayError::Auth);
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let url = spawn_proxy(&sample()).await;
        let gateway = HttpGateway::new(format!("{}/", url));
        let credential = Credential::new("secret");

        let mut doc = sample();
        doc.categories[0].hidden = true;
        let new_rev = gateway
            .write(&credential, &doc, &Revision::new("rev1"))
            .await
            .unwrap();
        assert_eq!(new_rev, Revision::new("rev2"));

        let snapshot = gateway.read(&credential).await.unwrap();
        assert_eq!(snapshot.document, doc);
        assert_eq!(snapshot.revision, new_rev);
    }

    #[tokio::test]
    async fn test_write_stale_revision_is_conflict() {
        let url = spawn_proxy(&sample()).await;
        let gateway = HttpGateway::new(format!("{}/", url));

        let err = gateway
            .write(&Credential::new("secret"), &sample(), &Revision::new("rev0"))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Conflict);
    }

    #[tokio::test]
    async fn test_server_error_is_transport_with_message() {
        let url = spawn_proxy(&sample()).await;
        let gateway = HttpGateway::new(format!("{}/broken", url));

        let err = gateway.read(&Credential::new("secret")).await.unwrap_err();
        assert_eq!(err, GatewayError::Transport("500: boom".into()));
    }

    #[tokio::test]
    async fn test_unreachable_is_transport() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = HttpGateway::new(format!("http://{}/", addr));
        let err = gateway.read(&Credential::new("secret")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
