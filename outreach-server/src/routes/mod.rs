//! HTTP route handlers
//!
//! One logical endpoint mounted at `/` and at the configured MCP path.
//! GET returns a liveness/usage message; POST hands the raw body to the
//! dispatcher and converts its `Reply` into an HTTP response.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use outreach_mcp::{McpServer, Reply};

use crate::ServerConfig;

/// Shared application state
pub struct AppState {
    /// The MCP dispatcher
    pub server: McpServer,
    /// Secondary endpoint path, echoed in the usage message
    pub mcp_path: String,
}

/// Liveness/usage message body
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: String,
    pub message: String,
}

async fn index(State(state): State<Arc<AppState>>) -> Json<StatusMessage> {
    Json(StatusMessage {
        status: "ok".to_string(),
        message: format!(
            "Use POST / or POST {} for MCP tool calls.",
            state.mcp_path
        ),
    })
}

async fn mcp_health() -> Json<StatusMessage> {
    Json(StatusMessage {
        status: "ok".to_string(),
        message: "POST to this path to call reach_out_to_patients.".to_string(),
    })
}

async fn dispatch(State(state): State<Arc<AppState>>, body: String) -> Response {
    into_response(state.server.handle(&body))
}

/// Map a dispatcher reply onto HTTP. SSE replies get the no-cache /
/// keep-alive framing headers.
fn into_response(reply: Reply) -> Response {
    match reply {
        Reply::Json(body) => (StatusCode::OK, Json(body)).into_response(),
        Reply::ClientError(body) => (StatusCode::BAD_REQUEST, Json(body)).into_response(),
        Reply::EventStream(stream) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/event-stream"),
                (header::CACHE_CONTROL, "no-cache"),
                (header::CONNECTION, "keep-alive"),
            ],
            stream,
        )
            .into_response(),
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(index).post(dispatch))
        .route(&config.mcp_path, get(mcp_health).post(dispatch))
        .with_state(state);

    if config.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use outreach_core::MockStampBackend;

    fn app() -> Router {
        let config = ServerConfig::default();
        let state = Arc::new(AppState {
            server: McpServer::with_default_tools(Arc::new(MockStampBackend::fixed())),
            mcp_path: config.mcp_path.clone(),
        });
        create_router(state, &config)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_usage_message() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "Use POST / or POST /api/mcp for MCP tool calls.");
    }

    #[tokio::test]
    async fn test_mcp_path_usage_message() {
        let response = app()
            .oneshot(Request::builder().uri("/api/mcp").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "POST to this path to call reach_out_to_patients.");
    }

    #[tokio::test]
    async fn test_direct_post_returns_plain_json() {
        let payload = json!({
            "patients": [{
                "id": "p-1",
                "fullName": "Jane Doe",
                "contacts": { "phone": "5551234567" }
            }]
        });

        let response = app().oneshot(post("/", payload.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = body_json(response).await;
        assert_eq!(body["content"][1]["json"]["outcomes"][0]["status"], "queued");
    }

    #[tokio::test]
    async fn test_rpc_post_returns_sse_with_framing_headers() {
        let payload = json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" });

        let response = app()
            .oneshot(post("/api/mcp", payload.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
        assert_eq!(response.headers()[header::CONNECTION], "keep-alive");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let stream = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(stream.starts_with("event: next\n"));
        assert!(stream.contains("event: completed"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let response = app().oneshot(post("/", "{oops".to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_validation_failure_is_400_with_field_errors() {
        let payload = json!({ "patients": [] });

        let response = app().oneshot(post("/", payload.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(body["error"]["errors"][0]["path"], "patients");
    }
}
