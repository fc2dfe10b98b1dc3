use crate::common::errors::AppError;
use crate::rpc::dispatcher::Dispatcher;
use crate::rpc::protocol::{RpcRequest, RpcResponse, PARSE_ERROR};
use std::io::{self, BufRead, Write};
use tracing::{debug, error};

/// Line-oriented JSON-RPC server: one request per input line, one response
/// per output line. The session lives as long as the server.
pub struct KeywordServer {
    dispatcher: Dispatcher,
}

impl KeywordServer {
    pub fn new() -> Self {
        Self {
            dispatcher: Dispatcher::new(),
        }
    }

    pub fn run_stdio() -> Result<(), AppError> {
        let stdin = io::stdin();
        let mut stdout = io::stdout().lock();
        Self::new().serve(stdin.lock(), &mut stdout)
    }

    pub fn serve(&mut self, input: impl BufRead, output: &mut impl Write) -> Result<(), AppError> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line) {
                Self::write_response(output, &response)?;
            }
        }

        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Option<RpcResponse> {
        let request: Result<RpcRequest, _> = serde_json::from_str(line);
        match request {
            Ok(req) => {
                debug!(method = %req.method, "handling request");
                let result = self.dispatcher.dispatch(&req.method, req.params);

                // No id means a notification: run it, never answer.
                if req.id.is_none() {
                    if let Err(err) = result {
                        error!("notification handling error: {err}");
                    }
                    return None;
                }

                Some(match result {
                    Ok(result) => RpcResponse::success(req.id, result),
                    Err(err) => RpcResponse::failure(req.id, err.code(), err.to_string()),
                })
            }
            Err(err) => Some(RpcResponse::failure(
                None,
                PARSE_ERROR,
                format!("invalid json-rpc request: {err}"),
            )),
        }
    }

    fn write_response(output: &mut impl Write, response: &RpcResponse) -> Result<(), AppError> {
        let line =
            serde_json::to_string(response).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        if let Err(e) = writeln!(output, "{line}") {
            error!("failed to write response: {e}");
            return Err(AppError::IoError(e.to_string()));
        }
        output.flush()?;
        Ok(())
    }
}

impl Default for KeywordServer {
    fn default() -> Self {
        Self::new()
    }
}
