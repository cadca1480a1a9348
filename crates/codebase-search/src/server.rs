//! Line-delimited JSON dispatcher over any async byte stream.
//!
//! Each input line is one request, `{"id"?, "tool", "params"}`; each request
//! gets exactly one response line, `{"id"?, "success", "message", "data"?}`.
//! Bad requests are answered with `success: false` and never stop the loop.

use std::io;
use std::str;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _};

use crate::registry::ToolRegistry;
use crate::{ToolInput, ToolOutput};

/// One request read from the input stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Caller-chosen identifier echoed back in the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Name of the tool to run
    pub tool: String,
    /// Tool parameters
    #[serde(default)]
    pub params: Value,
}

/// One response written to the output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResponse {
    /// Identifier copied from the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Result of the tool call
    #[serde(flatten)]
    pub output: ToolOutput,
}

/// Run one parsed request against `registry`.
pub async fn dispatch(registry: &ToolRegistry, request: DispatchRequest) -> DispatchResponse {
    let output = match registry.get_tool(&request.tool) {
        Some(tool) => match tool
            .execute(ToolInput {
                params: request.params,
            })
            .await
        {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!("Tool {} rejected request: {err}", request.tool);
                ToolOutput::error(err.to_string())
            }
        },
        None => {
            tracing::warn!("Unknown tool requested: {}", request.tool);
            ToolOutput::error(format!("Unknown tool: {}", request.tool))
        }
    };

    DispatchResponse {
        id: request.id,
        output,
    }
}

/// Parse and run one raw request line.
pub async fn dispatch_line(registry: &ToolRegistry, line: &str) -> DispatchResponse {
    match serde_json::from_str::<DispatchRequest>(line) {
        Ok(request) => dispatch(registry, request).await,
        Err(err) => {
            tracing::warn!("Malformed request: {err}");
            DispatchResponse {
                id: None,
                output: ToolOutput::error(format!("Malformed request: {err}")),
            }
        }
    }
}

/// Answer requests from `reader` on `writer` until end of input.
///
/// Returns the number of requests answered. A line that is not valid UTF-8
/// is answered as malformed.
///
/// # Errors
///
/// Returns an error if reading from `reader` or writing to `writer` fails.
pub async fn serve<R, W>(
    registry: &ToolRegistry,
    mut reader: R,
    mut writer: W,
) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut answered = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => dispatch_line(registry, line).await,
            Err(err) => {
                tracing::warn!("Malformed request: {err}");
                DispatchResponse {
                    id: None,
                    output: ToolOutput::error(format!("Malformed request: {err}")),
                }
            }
        };
        let mut encoded = serde_json::to_string(&response).map_err(io::Error::other)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
        answered += 1;
    }

    tracing::debug!("Input closed after {answered} requests");
    Ok(answered)
}
