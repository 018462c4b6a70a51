use axum::{
    extract::{rejection::JsonRejection, Query, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use menuboard_core::gateway::PASSWORD_HEADER;
use menuboard_core::{
    Language, MemoryStateStore, MenuDocument, Renderer, RendererOptions, Revision, SourceError,
};
use serde::{Deserialize, Serialize};

use super::storage::StorageError;
use super::AppState;
use crate::page::render_page;

/// Cookie lifetime for the remembered language: one year.
const LANGUAGE_COOKIE_MAX_AGE: u32 = 365 * 24 * 60 * 60;

// ============================================================================
// Authentication
// ============================================================================

/// Auth error response
#[derive(Serialize)]
struct AuthError {
    error: &'static str,
    message: &'static str,
}

/// Checks the admin password header on storage routes
pub(super) async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.admin_password.as_deref() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(AuthError {
                error: "storage_disabled",
                message: "No admin password configured",
            }),
        )
            .into_response();
    };

    let given = request
        .headers()
        .get(PASSWORD_HEADER)
        .and_then(|h| h.to_str().ok());

    match given {
        Some(password) if password == expected => next.run(request).await,
        Some(_) => (
            StatusCode::UNAUTHORIZED,
            Json(AuthError {
                error: "invalid_password",
                message: "Invalid admin password",
            }),
        )
            .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(AuthError {
                error: "missing_password",
                message: "X-Admin-Password header required",
            }),
        )
            .into_response(),
    }
}

// ============================================================================
// Public pages
// ============================================================================

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint (no auth required)
pub(super) async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct PageQuery {
    lang: Option<String>,
}

/// Public menu page. The language comes from `?lang=`, then the language
/// cookie, then the configured default; `?lang=` also sets the cookie.
pub(super) async fn menu_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let key = state.settings.storage_key.as_str();
    let store = match cookie_value(&headers, key) {
        Some(value) => MemoryStateStore::new().with(key, value),
        None => MemoryStateStore::new(),
    };
    let mut renderer = Renderer::new(RendererOptions::from(state.settings.as_ref()), store);

    let (content, _) = state.storage.snapshot().await;
    let fetched = serde_json::from_slice::<MenuDocument>(&content).map_err(SourceError::from);
    if let Err(e) = &fetched {
        tracing::warn!("Stored menu is unreadable: {}", e);
    }
    renderer.accept(fetched);

    let mut cookie = None;
    if let Some(language) = query.lang.as_deref().and_then(Language::parse) {
        if let Err(e) = renderer.set_language(language) {
            tracing::warn!("Failed to remember language: {}", e);
        }
        cookie = Some(format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            key,
            renderer.language().code(),
            LANGUAGE_COOKIE_MAX_AGE
        ));
    }

    let mut response = Html(render_page(&state.settings, renderer.view()).into_string()).into_response();
    if let Some(value) = cookie.and_then(|c| HeaderValue::from_str(&c).ok()) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// Raw menu document, never cached
pub(super) async fn menu_json(State(state): State<AppState>) -> Response {
    let (content, _) = state.storage.snapshot().await;
    (
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        content,
    )
        .into_response()
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

// ============================================================================
// Storage proxy
// ============================================================================

#[derive(Serialize)]
struct ApiError {
    error: String,
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiError {
            error: message.into(),
        }),
    )
        .into_response()
}

#[derive(Serialize)]
struct ReadResponse {
    content: String,
    sha: String,
}

#[derive(Deserialize)]
pub(super) struct WriteRequest {
    content: String,
    sha: String,
}

#[derive(Serialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Serialize)]
struct WrittenContent {
    sha: String,
}

/// Current document as base64 plus its revision
pub(super) async fn read_menu(State(state): State<AppState>) -> Response {
    let (content, revision) = state.storage.snapshot().await;
    Json(ReadResponse {
        content: STANDARD.encode(content),
        sha: revision.to_string(),
    })
    .into_response()
}

/// Replaces the document if the request's revision is still current
pub(super) async fn write_menu(
    State(state): State<AppState>,
    body: Result<Json<WriteRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let cleaned: String = request.content.split_whitespace().collect();
    let content = match STANDARD.decode(cleaned) {
        Ok(content) => content,
        Err(e) => return api_error(StatusCode::BAD_REQUEST, format!("Invalid base64: {}", e)),
    };

    match state.storage.write(content, &Revision::new(request.sha)).await {
        Ok(revision) => Json(WriteResponse {
            content: WrittenContent {
                sha: revision.to_string(),
            },
        })
        .into_response(),
        Err(e @ StorageError::Conflict { .. }) => {
            tracing::warn!("Rejected write: {}", e);
            api_error(StatusCode::CONFLICT, e.to_string())
        }
        Err(e @ StorageError::InvalidDocument(_)) => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e @ StorageError::IoError(..)) => {
            tracing::error!("Failed to store menu: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
