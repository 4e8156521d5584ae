//! MCP server over stdio.
//!
//! Messages are newline-delimited JSON-RPC 2.0. Requests are handled
//! concurrently, so a slow bulk lookup does not hold up a quick `ping`;
//! responses are written in completion order, matched by `id`.

pub mod protocol;
pub mod tools;

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info, warn};
use serde_json::{json, Value};
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::{MCP_PROTOCOL_VERSION, SERVER_NAME};
use crate::whois::WhoisClient;

use protocol::{
    error_message, result_message, Request, RpcError, INVALID_REQUEST, METHOD_NOT_FOUND,
    PARSE_ERROR,
};
use tools::Tool;

pub struct McpServer {
    client: WhoisClient,
}

impl McpServer {
    pub fn new(client: WhoisClient) -> Self {
        Self { client }
    }

    /// Serves stdin/stdout until stdin closes or Ctrl-C is received.
    pub async fn run_stdio(&self) -> Result<()> {
        info!("{} listening on stdio", SERVER_NAME);
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        tokio::select! {
            served = self.serve(stdin, stdout) => served,
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, shutting down");
                Ok(())
            }
        }
    }

    /// Reads requests from `reader` and writes responses to `writer` until
    /// the input ends and every in-flight request has been answered.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut pending = FuturesUnordered::new();
        let mut input_open = true;

        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line.context("Failed to read request")? {
                        Some(line) if line.trim().is_empty() => {}
                        Some(line) => {
                            let client = self.client.clone();
                            pending.push(async move { handle_line(&client, &line).await });
                        }
                        None => {
                            debug!("Input closed, {} requests in flight", pending.len());
                            input_open = false;
                        }
                    }
                }
                Some(response) = pending.next(), if !pending.is_empty() => {
                    if let Some(response) = response {
                        write_message(&mut writer, &response).await?;
                    }
                }
                else => break,
            }
        }

        Ok(())
    }
}

async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, message: &Value) -> Result<()> {
    let mut payload = serde_json::to_vec(message).context("Failed to serialize response")?;
    payload.push(b'\n');
    writer
        .write_all(&payload)
        .await
        .context("Failed to write response")?;
    writer.flush().await.context("Failed to flush response")?;
    Ok(())
}

/// Handles one input line. Returns `None` for notifications.
pub async fn handle_line(client: &WhoisClient, line: &str) -> Option<Value> {
    let message: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            warn!("Discarding malformed message: {}", e);
            let err = RpcError::new(PARSE_ERROR, format!("invalid JSON: {}", e));
            return Some(error_message(None, &err));
        }
    };

    let id = message.get("id").cloned();
    let request: Request = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(e) => {
            let err = RpcError::new(INVALID_REQUEST, format!("invalid request: {}", e));
            return Some(error_message(id, &err));
        }
    };

    debug!("Handling {}", request.method);
    let notification = request.is_notification();
    let id = request.id.clone();
    let outcome = dispatch(client, request).await;

    if notification {
        return None;
    }
    Some(match outcome {
        Ok(result) => result_message(id, result),
        Err(err) => error_message(id, &err),
    })
}

async fn dispatch(client: &WhoisClient, request: Request) -> Result<Value, RpcError> {
    match request.method.as_str() {
        "initialize" => Ok(json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": { "tools": {} },
        })),
        "ping" => Ok(json!({})),
        "tools/list" => {
            let tools: Vec<Value> = Tool::iter().map(|tool| tool.descriptor()).collect();
            Ok(json!({ "tools": tools }))
        }
        "tools/call" => call_tool(client, request.params).await,
        method if method.starts_with("notifications/") => Ok(Value::Null),
        other => Err(RpcError::new(
            METHOD_NOT_FOUND,
            format!("unsupported method '{}'", other),
        )),
    }
}

async fn call_tool(client: &WhoisClient, params: Value) -> Result<Value, RpcError> {
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::invalid_params("tool invocation missing name"))?;
    let tool = Tool::from_name(name)
        .ok_or_else(|| RpcError::invalid_params(format!("unknown tool '{}'", name)))?;
    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

    let data = tool.call(client, arguments).await?;
    let text = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": data,
        "isError": false,
    }))
}
