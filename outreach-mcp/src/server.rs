//! RPC dispatcher
//!
//! Interprets an incoming JSON body as either a direct tool call or a
//! JSON-RPC envelope, routes control methods through an exhaustive match,
//! and shapes the response for its transport: plain JSON for direct mode,
//! a single-frame SSE stream for RPC mode.
//!
//! Per-request state machine:
//! `Received → Classified → {Validating → Invoking → Responding} |
//! {Routing → Responding}`. Nothing persists across requests.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use outreach_core::{ErrorDetail, ErrorResponse, OutreachError, StampBackend};

use crate::error::McpError;
use crate::protocol::{codes, McpErrorBody, McpRequest, McpResponse};
use crate::sse;
use crate::tools::{outreach, ToolRegistry};
use crate::{PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};

/// A shaped response, ready for the transport layer
#[derive(Debug, Clone)]
pub enum Reply {
    /// Plain JSON body, HTTP 200
    Json(Value),
    /// Plain JSON body, HTTP 400
    ClientError(Value),
    /// Single-frame SSE stream body, HTTP 200
    EventStream(String),
}

/// Known control methods. `tools.call` is not listed here: it routes through
/// the tool registry instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlMethod {
    Initialize,
    ToolsList,
    Ping,
    NotificationsSubscribe,
    NotificationsUnsubscribe,
    LoggingSetLevel,
    ResourcesList,
    ResourcesSubscribe,
    ResourcesUnsubscribe,
    PromptsList,
    PromptsGet,
    Shutdown,
}

impl ControlMethod {
    /// Both `.` and `/` separators are accepted for every method.
    fn parse(method: &str) -> Option<Self> {
        match method.replace('/', ".").as_str() {
            "initialize" => Some(ControlMethod::Initialize),
            "tools.list" => Some(ControlMethod::ToolsList),
            "ping" => Some(ControlMethod::Ping),
            "notifications.subscribe" => Some(ControlMethod::NotificationsSubscribe),
            "notifications.unsubscribe" => Some(ControlMethod::NotificationsUnsubscribe),
            "logging.setLevel" => Some(ControlMethod::LoggingSetLevel),
            "resources.list" => Some(ControlMethod::ResourcesList),
            "resources.subscribe" => Some(ControlMethod::ResourcesSubscribe),
            "resources.unsubscribe" => Some(ControlMethod::ResourcesUnsubscribe),
            "prompts.list" => Some(ControlMethod::PromptsList),
            "prompts.get" => Some(ControlMethod::PromptsGet),
            "shutdown" => Some(ControlMethod::Shutdown),
            _ => None,
        }
    }
}

/// The MCP dispatcher. Stateless per call; the registry is immutable and
/// safe for unrestricted concurrent reads.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    /// Server over an explicit registry
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Server with both default tools bound to the given stamp backend
    pub fn with_default_tools(stamp: Arc<dyn StampBackend>) -> Self {
        Self::new(ToolRegistry::with_default_tools(stamp))
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw request body.
    ///
    /// Malformed JSON and direct-mode failures come back as plain JSON
    /// client errors; everything in RPC mode, success or error, comes back
    /// as a single-frame SSE stream.
    pub fn handle(&self, raw: &str) -> Reply {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting malformed request body");
                return Reply::ClientError(malformed_body(&e));
            }
        };

        let is_rpc = value
            .as_object()
            .is_some_and(|obj| obj.contains_key("method"));

        if is_rpc {
            Reply::EventStream(self.handle_rpc(value))
        } else {
            self.handle_direct(&value)
        }
    }

    /// Direct mode: the whole body is the default tool's arguments; the
    /// result is returned without an envelope.
    fn handle_direct(&self, arguments: &Value) -> Reply {
        match self.registry.invoke(outreach::TOOL_NAME, arguments) {
            Ok(result) => Reply::Json(result),
            Err(error) => {
                tracing::debug!(error = %error, "direct tool call rejected");
                Reply::ClientError(direct_error_body(error))
            }
        }
    }

    /// RPC mode: route by method, wrap in an envelope, render SSE frames.
    fn handle_rpc(&self, value: Value) -> String {
        let request: McpRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                let response = McpResponse::error(
                    Value::Null,
                    McpErrorBody {
                        code: codes::INVALID_REQUEST,
                        message: format!("Invalid request: {e}"),
                        data: None,
                    },
                );
                return render_response(response);
            }
        };

        tracing::debug!(method = %request.method, "dispatching rpc request");
        render_response(self.handle_request(request))
    }

    /// Route one parsed JSON-RPC request
    pub fn handle_request(&self, request: McpRequest) -> McpResponse {
        let result = if matches!(request.method.as_str(), "tools.call" | "tools/call") {
            self.handle_tools_call(&request.params)
        } else {
            match ControlMethod::parse(&request.method) {
                Some(method) => self.handle_control(method, &request.params),
                None => {
                    tracing::debug!(method = %request.method, "unsupported rpc method");
                    Err(McpError::UnsupportedMethod {
                        method: request.method.clone(),
                    })
                }
            }
        };

        match result {
            Ok(value) => McpResponse::success(request.id, value),
            Err(error) => McpResponse::error(request.id, error.to_rpc_error()),
        }
    }

    fn handle_tools_call(&self, params: &Value) -> Result<Value, McpError> {
        let name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or(Value::Object(Map::new()));

        self.registry.invoke(name, &arguments)
    }

    fn handle_control(&self, method: ControlMethod, params: &Value) -> Result<Value, McpError> {
        let echo = |key: &str| params.get(key).cloned().unwrap_or(Value::Null);

        match method {
            ControlMethod::Initialize => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                },
                "capabilities": {
                    "tools": { "list": true, "call": true }
                }
            })),
            ControlMethod::ToolsList => Ok(json!({
                "tools": self.registry.definitions(),
                "nextCursor": null
            })),
            ControlMethod::Ping => Ok(json!({ "message": "pong" })),
            ControlMethod::NotificationsSubscribe => Ok(json!({
                "subscriptions": echo("subscriptions")
            })),
            ControlMethod::NotificationsUnsubscribe => Ok(json!({
                "unsubscribed": echo("subscriptions")
            })),
            ControlMethod::LoggingSetLevel => Ok(json!({ "acknowledged": true })),
            ControlMethod::ResourcesList => Ok(json!({
                "resources": [],
                "nextCursor": null
            })),
            ControlMethod::ResourcesSubscribe => Ok(json!({
                "subscriptions": echo("resources")
            })),
            ControlMethod::ResourcesUnsubscribe => Ok(json!({
                "unsubscribed": echo("resources")
            })),
            ControlMethod::PromptsList => Ok(json!({
                "prompts": [],
                "nextCursor": null
            })),
            ControlMethod::PromptsGet => Err(McpError::PromptNotFound),
            ControlMethod::Shutdown => Ok(json!({ "acknowledged": true })),
        }
    }
}

/// Envelope → SSE frames (`next` + `completed`, or a lone `error`)
fn render_response(response: McpResponse) -> String {
    let is_error = response.error.is_some();
    let envelope = match serde_json::to_value(&response) {
        Ok(envelope) => envelope,
        Err(e) => json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": { "code": codes::INTERNAL_ERROR, "message": e.to_string() }
        }),
    };

    let frames = if is_error {
        sse::error_frames(envelope)
    } else {
        sse::success_frames(envelope)
    };
    sse::render(&frames)
}

fn malformed_body(error: &serde_json::Error) -> Value {
    let response = ErrorResponse {
        error: ErrorDetail {
            code: "MALFORMED_JSON".to_string(),
            message: format!("Request body is not valid JSON: {error}"),
            errors: None,
        },
    };
    serde_json::to_value(response).unwrap_or_default()
}

fn direct_error_body(error: McpError) -> Value {
    let response = match error {
        McpError::InvalidArguments { issues } => {
            OutreachError::Validation { issues }.to_error_response()
        }
        other => ErrorResponse {
            error: ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: other.to_string(),
                errors: None,
            },
        },
    };
    serde_json::to_value(response).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_core::MockStampBackend;

    fn server() -> McpServer {
        McpServer::with_default_tools(Arc::new(MockStampBackend::fixed()))
    }

    fn reachable_body() -> Value {
        json!({
            "patients": [{
                "id": "p-1",
                "fullName": "Jane Doe",
                "contacts": { "phone": "5551234567" }
            }]
        })
    }

    fn stream_of(reply: Reply) -> String {
        match reply {
            Reply::EventStream(body) => body,
            other => panic!("expected event stream, got {other:?}"),
        }
    }

    /// Extract the envelope from the first `data:` line of a stream
    fn first_envelope(stream: &str) -> Value {
        let data_line = stream
            .lines()
            .find(|line| line.starts_with("data: "))
            .expect("data line");
        serde_json::from_str(&data_line["data: ".len()..]).expect("envelope json")
    }

    #[test]
    fn test_malformed_json_is_plain_client_error() {
        let reply = server().handle("{not json");
        match reply {
            Reply::ClientError(body) => {
                assert_eq!(body["error"]["code"], "MALFORMED_JSON");
            }
            other => panic!("expected client error, got {other:?}"),
        }
    }

    #[test]
    fn test_direct_mode_returns_plain_json() {
        let reply = server().handle(&reachable_body().to_string());
        match reply {
            Reply::Json(body) => {
                assert_eq!(body["content"][1]["json"]["outcomes"][0]["status"], "queued");
            }
            other => panic!("expected json reply, got {other:?}"),
        }
    }

    #[test]
    fn test_direct_mode_validation_failure() {
        let reply = server().handle(r#"{"patients": []}"#);
        match reply {
            Reply::ClientError(body) => {
                assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
                assert_eq!(body["error"]["errors"][0]["path"], "patients");
            }
            other => panic!("expected client error, got {other:?}"),
        }
    }

    #[test]
    fn test_tools_call_success_stream() {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools.call",
            "params": {
                "name": "reach_out_to_patients",
                "arguments": reachable_body()
            }
        });

        let stream = stream_of(server().handle(&request.to_string()));

        assert!(stream.starts_with("event: next\n"));
        assert!(stream.contains("event: completed\ndata: {}"));

        let envelope = first_envelope(&stream);
        assert_eq!(envelope["jsonrpc"], "2.0");
        assert_eq!(envelope["id"], 1);
        assert_eq!(
            envelope["result"]["content"][1]["json"]["outcomes"][0]["status"],
            "queued"
        );
    }

    #[test]
    fn test_unknown_method_error_stream() {
        let request = json!({ "jsonrpc": "2.0", "id": 2, "method": "foo.bar" });

        let stream = stream_of(server().handle(&request.to_string()));

        assert!(stream.starts_with("event: error\n"));
        assert!(!stream.contains("event: completed"));

        let envelope = first_envelope(&stream);
        assert_eq!(envelope["error"]["code"], -32601);
        assert!(envelope["error"]["message"]
            .as_str()
            .unwrap()
            .contains("foo.bar"));
    }

    #[test]
    fn test_unknown_tool() {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools.call",
            "params": { "name": "send_fax", "arguments": {} }
        });

        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));

        assert_eq!(envelope["error"]["code"], -32601);
        assert!(envelope["error"]["message"]
            .as_str()
            .unwrap()
            .contains("send_fax"));
    }

    #[test]
    fn test_invalid_tool_arguments_carry_detail() {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools.call",
            "params": {
                "name": "reach_out_to_patients",
                "arguments": { "patients": [] }
            }
        });

        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));

        assert_eq!(envelope["error"]["code"], -32602);
        assert_eq!(envelope["error"]["data"]["errors"][0]["path"], "patients");
    }

    #[test]
    fn test_initialize() {
        let request = json!({ "jsonrpc": "2.0", "id": 5, "method": "initialize" });

        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));

        let result = &envelope["result"];
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(result["capabilities"]["tools"]["list"], true);
        assert_eq!(result["capabilities"]["tools"]["call"], true);
    }

    #[test]
    fn test_tools_list_enumerates_both_tools() {
        let request = json!({ "jsonrpc": "2.0", "id": 6, "method": "tools/list" });

        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));

        let tools = envelope["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        for tool in tools {
            assert!(!tool["inputSchema"]["properties"]
                .as_object()
                .unwrap()
                .is_empty());
        }
        assert!(envelope["result"]["nextCursor"].is_null());
    }

    #[test]
    fn test_ping() {
        let request = json!({ "jsonrpc": "2.0", "id": 7, "method": "ping" });
        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));
        assert_eq!(envelope["result"]["message"], "pong");
    }

    #[test]
    fn test_subscription_echo() {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 8,
            "method": "notifications/subscribe",
            "params": { "subscriptions": ["census"] }
        });
        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));
        assert_eq!(envelope["result"]["subscriptions"][0], "census");

        let request = json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "resources.unsubscribe",
            "params": { "resources": ["census"] }
        });
        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));
        assert_eq!(envelope["result"]["unsubscribed"][0], "census");
    }

    #[test]
    fn test_prompts_get_is_not_found() {
        let request = json!({ "jsonrpc": "2.0", "id": 10, "method": "prompts.get" });
        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));
        assert_eq!(envelope["error"]["code"], -32004);
        assert_eq!(envelope["error"]["message"], "Prompt not found.");
    }

    #[test]
    fn test_acknowledged_methods() {
        for method in ["logging/setLevel", "shutdown"] {
            let request = json!({ "jsonrpc": "2.0", "id": 11, "method": method });
            let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));
            assert_eq!(envelope["result"]["acknowledged"], true, "{method}");
        }
    }

    #[test]
    fn test_separator_aliases() {
        for method in ["tools.list", "tools/list", "prompts.list", "prompts/list"] {
            let request = json!({ "jsonrpc": "2.0", "id": 12, "method": method });
            let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));
            assert!(envelope["error"].is_null(), "{method} should be routed");
        }
    }

    #[test]
    fn test_missing_id_echoes_null() {
        let request = json!({ "jsonrpc": "2.0", "method": "ping" });
        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));
        assert!(envelope["id"].is_null());
        assert!(envelope.as_object().unwrap().contains_key("id"));
    }

    #[test]
    fn test_non_string_method_is_invalid_request() {
        let request = json!({ "jsonrpc": "2.0", "id": 13, "method": 42 });
        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));
        assert_eq!(envelope["error"]["code"], -32600);
    }

    #[test]
    fn test_census_via_tools_call() {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 14,
            "method": "tools/call",
            "params": {
                "name": "get_active_patient_census",
                "arguments": { "filter": "high_risk" }
            }
        });

        let envelope = first_envelope(&stream_of(server().handle(&request.to_string())));

        let records = envelope["result"]["content"][0]["json"].as_array().unwrap();
        assert_eq!(records.len(), 3);
    }
}
