use serde::{Deserialize, Serialize};

/// A structural parse error. Matches the expected-error.json format exactly.
///
/// Only defects that break the ability to delimit sections produce a
/// `ParseError`; malformed or missing attributes degrade to absent fields
/// instead and are surfaced, if at all, by the validation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseError {
    pub stage: String,
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl ParseError {
    pub fn new(stage: &str, file: &str, line: u32, message: impl Into<String>) -> Self {
        ParseError {
            stage: stage.to_owned(),
            file: file.to_owned(),
            line,
            message: message.into(),
        }
    }

    pub fn split(file: &str, line: u32, message: impl Into<String>) -> Self {
        ParseError::new("split", file, line, message)
    }

    /// Serialize to JSON matching the expected-error.json format.
    /// Always includes all fields.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "file":    self.file,
            "line":    self.line,
            "message": self.message,
            "stage":   self.stage,
        })
    }
}
