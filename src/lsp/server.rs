//! JSON-RPC 2.0 scaffold server for the language protocol.
//!
//! Handles the lifecycle methods (`initialize`, `shutdown`, `exit`) and
//! answers everything else with a method-not-found error. Document
//! synchronization notifications are accepted and ignored for now.

use crate::lsp::message_io::{MessageReader, MessageWriter};
use crate::VERSION;
use serde_json::{json, Value};
use std::io::{BufRead, Write};

/// JSON-RPC error: invalid JSON payload.
const PARSE_ERROR: i64 = -32700;
/// JSON-RPC error: structurally invalid request.
const INVALID_REQUEST: i64 = -32600;
/// JSON-RPC error: unknown method.
const METHOD_NOT_FOUND: i64 = -32601;

/// The language-server scaffold.
#[derive(Debug, Default)]
pub struct Server {
    shutdown_received: bool,
    exit_requested: bool,
    exit_code: i32,
}

impl Server {
    /// Create a server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the message loop until `exit` or EOF; returns the exit code.
    pub fn run(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> i32 {
        let reader = MessageReader::new();

        while let Some(payload) = reader.read_message(input) {
            self.handle_payload(&payload, output);
            if self.exit_requested {
                return self.exit_code;
            }
        }

        if self.exit_requested {
            self.exit_code
        } else {
            0
        }
    }

    fn handle_payload(&mut self, payload: &str, output: &mut impl Write) {
        let message: Value = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(_) => {
                self.send_error(output, Value::Null, PARSE_ERROR, "Parse error");
                return;
            }
        };

        let version = message.get("jsonrpc").and_then(Value::as_str);
        let method = match (version, message.get("method").and_then(Value::as_str)) {
            (Some("2.0"), Some(method)) => method.to_string(),
            _ => {
                self.send_error(output, Value::Null, INVALID_REQUEST, "Invalid Request");
                return;
            }
        };

        match message.get("id") {
            Some(id) => self.handle_request(&method, id.clone(), output),
            None => self.handle_notification(&method),
        }
    }

    fn handle_request(&mut self, method: &str, id: Value, output: &mut impl Write) {
        match method {
            "initialize" => {
                let result = self.make_initialize_result();
                self.send_response(output, id, result);
            }
            "shutdown" => {
                self.shutdown_received = true;
                self.send_response(output, id, Value::Null);
            }
            _ => self.send_error(output, id, METHOD_NOT_FOUND, "Method not implemented"),
        }
    }

    fn handle_notification(&mut self, method: &str) {
        if method == "exit" {
            self.exit_requested = true;
            self.exit_code = if self.shutdown_received { 0 } else { 1 };
        }
        // Other notifications (initialized, didOpen, ...) are accepted silently.
    }

    fn make_initialize_result(&self) -> Value {
        json!({
            "capabilities": {
                "textDocumentSync": {
                    "openClose": true,
                    "change": 2,
                    "save": {"includeText": false}
                },
                "hoverProvider": false,
                "definitionProvider": false,
                "referencesProvider": false,
                "documentSymbolProvider": false,
                "completionProvider": {}
            },
            "serverInfo": {
                "name": "Sable Language Server",
                "version": VERSION
            }
        })
    }

    fn send_response(&self, output: &mut impl Write, id: Value, result: Value) {
        let payload = json!({"jsonrpc": "2.0", "id": id, "result": result});
        self.write_payload(output, &payload);
    }

    fn send_error(&self, output: &mut impl Write, id: Value, code: i64, message: &str) {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": code, "message": message}
        });
        self.write_payload(output, &payload);
    }

    fn write_payload(&self, output: &mut impl Write, payload: &Value) {
        let rendered = payload.to_string();
        // A broken client pipe ends the session; there is nowhere to report it.
        let _ = MessageWriter::new().write_message(output, &rendered);
    }
}
