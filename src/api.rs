//! REST API for the banking assistant
//!
//! Thin transport over `ResponseRouter`; holds no per-user state.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::{Credential, Mode, ModeLabel};
use crate::router::ResponseRouter;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Overrides the server's configured key for this request only
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    pub mode: ModeLabel,
    pub indicator: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub router: Arc<ResponseRouter>,
    pub credential: Option<Credential>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "mode": Mode::from_credential(state.credential.as_ref()),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let message = req.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Message must not be empty".into())),
        );
    }

    let credential = req
        .api_key
        .and_then(Credential::new)
        .or_else(|| state.credential.clone());
    let mode = Mode::from_credential(credential.as_ref());

    info!("Received chat request (mode: {})", mode);

    let result = state.router.route(message, mode, credential.as_ref()).await;

    (
        StatusCode::OK,
        Json(ApiResponse::success(ChatReply {
            indicator: result.mode.indicator().to_string(),
            answer: result.answer,
            mode: result.mode,
        })),
    )
}

/// =============================
/// Router
/// =============================

pub fn create_router(router: Arc<ResponseRouter>, credential: Option<Credential>) -> Router {
    let state = ApiState { router, credential };

    Router::new()
        .route("/health", axum::routing::get(health))
        .route("/api/chat", post(chat_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    router: Arc<ResponseRouter>,
    credential: Option<Credential>,
    port: u16,
) -> crate::Result<()> {
    let app = create_router(router, credential);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use crate::responder::{LocalResponder, MockRemote};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app(remote: MockRemote, credential: Option<&str>) -> Router {
        let router = Arc::new(ResponseRouter::new(
            LocalResponder::default(),
            Arc::new(remote),
        ));
        create_router(router, credential.and_then(Credential::new))
    }

    async fn post_chat(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_chat_without_key_uses_fallback() {
        let (status, json) = post_chat(
            app(MockRemote::answering("unused"), None),
            serde_json::json!({ "message": "Branch hours?" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["mode"], "FALLBACK");
        assert_eq!(json["data"]["indicator"], "🔵 [FALLBACK MODE]");
        assert!(json["data"]["answer"]
            .as_str()
            .unwrap()
            .starts_with("Downtown: 123 Main St"));
    }

    #[tokio::test]
    async fn test_request_key_enables_ai() {
        let (_, json) = post_chat(
            app(MockRemote::answering("Hello from the model"), None),
            serde_json::json!({ "message": "hi", "api_key": "sk-request" }),
        )
        .await;

        assert_eq!(json["data"]["mode"], "AI_MODE");
        assert_eq!(json["data"]["answer"], "Hello from the model");
    }

    #[tokio::test]
    async fn test_remote_failure_reports_ai_error() {
        let (status, json) = post_chat(
            app(
                MockRemote::failing(RemoteError::Transport("timeout".into())),
                Some("sk-server"),
            ),
            serde_json::json!({ "message": "Tell me a joke" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["mode"], "AI_ERROR");
        assert!(json["data"]["answer"]
            .as_str()
            .unwrap()
            .ends_with("(Note: AI failed: timeout)"));
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let (status, json) = post_chat(
            app(MockRemote::answering("unused"), None),
            serde_json::json!({ "message": "   " }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_health_reports_mode() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let res = app(MockRemote::answering("unused"), Some("sk-server"))
            .oneshot(req)
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["mode"], "AI_ENABLED");
    }
}
