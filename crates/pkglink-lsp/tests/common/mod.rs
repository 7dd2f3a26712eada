//! Common test utilities for integration tests.
//!
//! Provides `LspClient`, which drives the server binary over stdio.

use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, Command, Stdio};

/// A notification received while waiting for a response.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields inspected only by some tests
pub(crate) struct CapturedNotification {
    pub method: String,
    pub params: Value,
}

/// LSP test client for communicating with the server binary.
pub(crate) struct LspClient {
    process: Child,
    /// Notifications in the order they were received.
    notifications: Vec<CapturedNotification>,
    /// Value returned for every item of a `workspace/configuration` request.
    configuration: Value,
    /// Sections requested through `workspace/configuration`.
    configuration_requests: Vec<Value>,
    reader: BufReader<std::process::ChildStdout>,
}

impl LspClient {
    /// Spawn the pkglink-lsp binary.
    pub(crate) fn spawn() -> Self {
        let mut process = Command::new(env!("CARGO_BIN_EXE_pkglink-lsp"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn pkglink-lsp binary");

        let stdout = process.stdout.take().expect("Failed to capture stdout");

        Self {
            process,
            notifications: Vec::new(),
            configuration: Value::Null,
            configuration_requests: Vec::new(),
            reader: BufReader::new(stdout),
        }
    }

    /// Find a captured notification by method name.
    #[allow(dead_code)] // Not used in all tests
    pub(crate) fn find_notification(&self, method: &str) -> Option<&CapturedNotification> {
        self.notifications.iter().find(|n| n.method == method)
    }

    /// Sets the answer to future `workspace/configuration` requests.
    #[allow(dead_code)] // Not used in all tests
    pub(crate) fn set_configuration(&mut self, value: Value) {
        self.configuration = value;
    }

    /// Items of every `workspace/configuration` request answered so far.
    #[allow(dead_code)] // Not used in all tests
    pub(crate) fn configuration_requests(&self) -> &[Value] {
        &self.configuration_requests
    }

    /// Answers a request sent by the server to the client.
    fn answer_server_request(&mut self, request: &Value) {
        let result = match request["method"].as_str() {
            Some("workspace/configuration") => {
                let items = request["params"]["items"]
                    .as_array()
                    .cloned()
                    .unwrap_or_default();
                let answers: Vec<Value> = items
                    .iter()
                    .map(|_| self.configuration.clone())
                    .collect();
                self.configuration_requests.extend(items);
                Value::Array(answers)
            }
            _ => Value::Null,
        };

        self.send(&json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "result": result
        }));
    }

    /// Send a JSON-RPC message to the server.
    pub(crate) fn send(&mut self, message: &Value) {
        let body = serde_json::to_string(message).unwrap();
        let header = format!("Content-Length: {}\r\n\r\n", body.len());

        let stdin = self.process.stdin.as_mut().expect("stdin not captured");
        stdin.write_all(header.as_bytes()).unwrap();
        stdin.write_all(body.as_bytes()).unwrap();
        stdin.flush().unwrap();
    }

    /// Read a JSON-RPC response from the server.
    ///
    /// Captures notifications and returns the first response with matching id,
    /// or any response/error if no id filter is provided.
    pub(crate) fn read_response(&mut self, expected_id: Option<i64>) -> Value {
        loop {
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                let bytes_read = self
                    .reader
                    .read_line(&mut line)
                    .expect("Failed to read header");

                // EOF - server closed connection
                assert!(bytes_read != 0, "Server closed connection unexpectedly");

                if line == "\r\n" || line == "\n" {
                    break;
                }

                if line.to_lowercase().starts_with("content-length:") {
                    content_length = line
                        .split(':')
                        .nth(1)
                        .unwrap()
                        .trim()
                        .parse()
                        .expect("Invalid content length");
                }
            }

            if content_length == 0 {
                continue;
            }

            let mut body = vec![0u8; content_length];
            self.reader
                .read_exact(&mut body)
                .expect("Failed to read body");

            let message: Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
                panic!("Invalid JSON: {e} in: {:?}", String::from_utf8_lossy(&body))
            });

            // Server to client request
            if message.get("id").is_some() && message.get("method").is_some() {
                self.answer_server_request(&message);
                continue;
            }

            if message.get("id").is_none() {
                if let Some(method) = message.get("method").and_then(|m| m.as_str()) {
                    self.notifications.push(CapturedNotification {
                        method: method.to_string(),
                        params: message.get("params").cloned().unwrap_or(Value::Null),
                    });
                }
                continue;
            }

            if let Some(id) = expected_id {
                if message.get("id") == Some(&json!(id)) {
                    return message;
                }
                continue;
            }

            return message;
        }
    }

    /// Initialize the LSP session without initialization options.
    pub(crate) fn initialize(&mut self) -> Value {
        self.initialize_with_options(Value::Null)
    }

    /// Initialize the LSP session, passing `options` as `initializationOptions`.
    pub(crate) fn initialize_with_options(&mut self, options: Value) -> Value {
        self.initialize_with(options, false)
    }

    /// Initialize the LSP session, optionally advertising support for
    /// `workspace/configuration`.
    pub(crate) fn initialize_with(&mut self, options: Value, pull_configuration: bool) -> Value {
        self.send(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "processId": null,
                "capabilities": {
                    "workspace": {
                        "configuration": pull_configuration
                    },
                    "textDocument": {
                        "documentLink": {
                            "tooltipSupport": true
                        }
                    }
                },
                "initializationOptions": options,
                "rootUri": "file:///tmp",
                "workspaceFolders": null
            }
        }));

        let response = self.read_response(Some(1));

        self.send(&json!({
            "jsonrpc": "2.0",
            "method": "initialized",
            "params": {}
        }));

        response
    }

    /// Open a text document.
    pub(crate) fn did_open(&mut self, uri: &str, language_id: &str, text: &str) {
        self.send(&json!({
            "jsonrpc": "2.0",
            "method": "textDocument/didOpen",
            "params": {
                "textDocument": {
                    "uri": uri,
                    "languageId": language_id,
                    "version": 1,
                    "text": text
                }
            }
        }));
    }

    /// Replace the full text of an open document.
    #[allow(dead_code)] // Not used in all tests
    pub(crate) fn did_change(&mut self, uri: &str, version: i32, text: &str) {
        self.send(&json!({
            "jsonrpc": "2.0",
            "method": "textDocument/didChange",
            "params": {
                "textDocument": {"uri": uri, "version": version},
                "contentChanges": [{"text": text}]
            }
        }));
    }

    /// Push new settings to the server.
    #[allow(dead_code)] // Not used in all tests
    pub(crate) fn did_change_configuration(&mut self, settings: Value) {
        self.send(&json!({
            "jsonrpc": "2.0",
            "method": "workspace/didChangeConfiguration",
            "params": {"settings": settings}
        }));
    }

    /// Request document links.
    pub(crate) fn document_link(&mut self, id: i64, uri: &str) -> Value {
        self.send(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "textDocument/documentLink",
            "params": {
                "textDocument": {"uri": uri}
            }
        }));
        self.read_response(Some(id))
    }

    /// Shutdown the server.
    pub(crate) fn shutdown(&mut self) -> Value {
        self.send(&json!({
            "jsonrpc": "2.0",
            "id": 999,
            "method": "shutdown"
        }));
        self.read_response(Some(999))
    }
}

impl Drop for LspClient {
    fn drop(&mut self) {
        let _ = self.process.kill();
    }
}
