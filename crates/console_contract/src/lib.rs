//! Shared console contracts used by the execution-service adapters, the session core, and the
//! console UI.
//!
//! This crate is intentionally runtime-agnostic. It defines the wire payloads exchanged with the
//! remote execution service, the normalized reply the session core consumes, and the catalog and
//! suggestion records, without depending on Leptos, browser APIs, or host adapters.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result payload the execution service returns to request a transcript wipe.
pub const CLEAR_SCREEN_SENTINEL: &str = "CLEAR_SCREEN";

/// Introspection command used to read the service-side working directory.
pub const PWD_COMMAND: &str = "pwd";

/// Submissions starting with this prefix may change the working directory.
pub const CD_COMMAND_PREFIX: &str = "cd ";

/// Execution request sent for one submitted command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    /// Command line text.
    pub command: String,
}

impl ExecuteRequest {
    /// Creates a request for `command`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Request used by the working-directory refresh.
    pub fn pwd() -> Self {
        Self::new(PWD_COMMAND)
    }
}

/// One lexical token as emitted by the execution service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToken {
    /// 1-based token position.
    #[serde(default)]
    pub numero: i64,
    /// Token text. Numeric tokens arrive as JSON numbers.
    #[serde(default)]
    pub valor: Value,
    /// Token classification label.
    #[serde(default)]
    pub tipo: String,
}

/// Success payload returned by the execution service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Command output: usually a string, occasionally a structured value.
    #[serde(default)]
    pub execution_result: Value,
    /// Lexical breakdown of the submitted command.
    #[serde(default)]
    pub lexical_analysis: Vec<WireToken>,
}

/// Failure payload returned with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteFailure {
    /// Human-readable failure message.
    pub error: String,
}

/// Normalized lexical token kept in the session context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalToken {
    /// 1-based token position.
    pub index: u32,
    /// Token text.
    pub value: String,
    /// Token classification label.
    pub kind: String,
}

/// Output half of a normalized reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "kebab-case")]
pub enum ExecutionOutput {
    /// The service asked for the target transcript to be cleared.
    ClearScreen,
    /// Printable output to append to the transcript.
    Text(String),
}

/// Execution reply after normalization at the dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReply {
    /// Output to render, or the clear-screen control signal.
    pub output: ExecutionOutput,
    /// Lexical breakdown of the command, in service order.
    pub tokens: Vec<LexicalToken>,
}

impl ExecuteResponse {
    /// Builds a plain-text success response without a lexical breakdown.
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            execution_result: Value::String(output.into()),
            lexical_analysis: Vec::new(),
        }
    }

    /// Normalizes the dynamically-shaped payload into an [`ExecutionReply`].
    pub fn into_reply(self) -> ExecutionReply {
        let output = match self.execution_result {
            Value::String(text) if text == CLEAR_SCREEN_SENTINEL => ExecutionOutput::ClearScreen,
            Value::String(text) => ExecutionOutput::Text(text),
            Value::Null => ExecutionOutput::Text(String::new()),
            other => ExecutionOutput::Text(
                serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string()),
            ),
        };
        let tokens = self
            .lexical_analysis
            .into_iter()
            .enumerate()
            .map(|(position, token)| normalize_token(position, token))
            .collect();
        ExecutionReply { output, tokens }
    }
}

fn normalize_token(position: usize, token: WireToken) -> LexicalToken {
    let index = u32::try_from(token.numero)
        .ok()
        .filter(|index| *index >= 1)
        .unwrap_or_else(|| u32::try_from(position + 1).unwrap_or(u32::MAX));
    let value = match token.valor {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    LexicalToken {
        index,
        value,
        kind: token.tipo,
    }
}

/// Catalog grouping used by the command browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandCategory {
    /// Help and session commands.
    System,
    /// Directory navigation and listing.
    Navigation,
    /// File manipulation.
    File,
    /// Archive creation and extraction.
    Compression,
    /// Network diagnostics.
    Network,
}

impl CommandCategory {
    /// All categories in display order.
    pub const ALL: [CommandCategory; 5] = [
        Self::System,
        Self::Navigation,
        Self::File,
        Self::Compression,
        Self::Network,
    ];

    /// Human-readable category label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Navigation => "Navigation",
            Self::File => "Files",
            Self::Compression => "Compression",
            Self::Network => "Network",
        }
    }
}

/// One known command in the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable command name.
    pub id: String,
    /// Short description.
    pub description: String,
    /// Example invocation.
    pub example: String,
    /// Catalog grouping.
    pub category: CommandCategory,
}

/// Source of a suggestion candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    /// A catalog command.
    Command,
    /// A directory previously visited in this session.
    Directory,
}

impl SuggestionKind {
    /// Stable lowercase label shown next to the suggestion.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Directory => "directory",
        }
    }
}

/// One prefix-matched completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    /// Stable candidate identifier.
    pub id: String,
    /// Text placed into the input buffer when selected.
    pub label: String,
    /// Candidate source.
    pub kind: SuggestionKind,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn clear_screen_result_becomes_control_signal() {
        let reply = ExecuteResponse::text(CLEAR_SCREEN_SENTINEL).into_reply();
        assert_eq!(reply.output, ExecutionOutput::ClearScreen);
        assert!(reply.tokens.is_empty());
    }

    #[test]
    fn structured_results_are_serialized_for_display() {
        let response: ExecuteResponse = serde_json::from_value(json!({
            "execution_result": { "files": ["a.txt"] },
        }))
        .expect("parse response");

        let ExecutionOutput::Text(text) = response.into_reply().output else {
            panic!("expected text output");
        };
        assert!(text.contains("\"files\""));
        assert!(text.contains("a.txt"));
    }

    #[test]
    fn missing_fields_default_to_empty_output_and_tokens() {
        let response: ExecuteResponse = serde_json::from_str("{}").expect("parse empty response");
        let reply = response.into_reply();
        assert_eq!(reply.output, ExecutionOutput::Text(String::new()));
        assert!(reply.tokens.is_empty());
    }

    #[test]
    fn wire_tokens_normalize_numeric_values_and_bad_indices() {
        let response: ExecuteResponse = serde_json::from_value(json!({
            "execution_result": "ok",
            "lexical_analysis": [
                { "numero": 1, "valor": "ping", "tipo": "COMANDO" },
                { "numero": 0, "valor": 4, "tipo": "NUMERO" },
            ],
        }))
        .expect("parse response");

        assert_eq!(
            response.into_reply().tokens,
            vec![
                LexicalToken {
                    index: 1,
                    value: "ping".to_string(),
                    kind: "COMANDO".to_string(),
                },
                LexicalToken {
                    index: 2,
                    value: "4".to_string(),
                    kind: "NUMERO".to_string(),
                },
            ]
        );
    }

    #[test]
    fn request_serializes_as_command_object() {
        let raw = serde_json::to_value(ExecuteRequest::pwd()).expect("serialize request");
        assert_eq!(raw, json!({ "command": "pwd" }));
    }
}
