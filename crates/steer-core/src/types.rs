use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::event::HookEvent;

/// JSON payload the host runtime writes to a hook's stdin.
///
/// Every field is optional; a missing field means the hook has nothing to
/// classify. Fields this crate does not model are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_event_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_output: Option<serde_json::Value>,

    /// Newer hosts report the tool result under this key instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_response: Option<serde_json::Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl HookInput {
    pub fn prompt_text(&self) -> &str {
        self.prompt.as_deref().unwrap_or_default()
    }

    /// Reads a string field out of `tool_input`.
    pub fn tool_input_str(&self, key: &str) -> Option<&str> {
        self.tool_input.as_ref()?.get(key)?.as_str()
    }

    pub fn command(&self) -> Option<&str> {
        self.tool_input_str("command")
    }

    pub fn file_path(&self) -> Option<&str> {
        self.tool_input_str("file_path")
    }

    /// Flattens the tool output into text.
    ///
    /// `tool_output` wins over `tool_response` when both are present. Older
    /// hosts send a plain string; newer ones send an object with `stdout` and
    /// `stderr`, which are joined in that order.
    pub fn tool_output_text(&self) -> String {
        let output = self
            .tool_output
            .as_ref()
            .filter(|v| !v.is_null())
            .or(self.tool_response.as_ref());

        match output {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(serde_json::Value::Object(map)) => ["stdout", "stderr"]
                .iter()
                .filter_map(|key| map.get(*key).and_then(|v| v.as_str()))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => String::new(),
        }
    }
}

/// Advisory produced by a classifier: the event it answers and free text for
/// the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub event: HookEvent,
    pub advisory: String,
}

impl Annotation {
    pub fn new(event: HookEvent, advisory: impl Into<String>) -> Self {
        Self {
            event,
            advisory: advisory.into(),
        }
    }
}

/// Wire shape the host expects on stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: HookEvent,
    pub additional_context: String,
}

impl From<Annotation> for HookOutput {
    fn from(annotation: Annotation) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: annotation.event,
                additional_context: annotation.advisory,
            },
        }
    }
}
