use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host events the classifiers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum HookEvent {
    UserPromptSubmit,
    PostToolUse,
}

impl HookEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::PostToolUse => "PostToolUse",
        }
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HookEvent {
    type Err = HookEventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "userpromptsubmit" | "user-prompt-submit" | "user_prompt_submit" => {
                Ok(Self::UserPromptSubmit)
            }
            "posttooluse" | "post-tool-use" | "post_tool_use" => Ok(Self::PostToolUse),
            _ => Err(HookEventParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown hook event: {0}")]
pub struct HookEventParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_as_str() {
        assert_eq!(HookEvent::UserPromptSubmit.as_str(), "UserPromptSubmit");
        assert_eq!(HookEvent::PostToolUse.to_string(), "PostToolUse");
    }

    #[test]
    fn test_event_parse() {
        assert_eq!(
            "UserPromptSubmit".parse::<HookEvent>().unwrap(),
            HookEvent::UserPromptSubmit
        );
        assert_eq!(
            "post-tool-use".parse::<HookEvent>().unwrap(),
            HookEvent::PostToolUse
        );
        assert_eq!(
            "post_tool_use".parse::<HookEvent>().unwrap(),
            HookEvent::PostToolUse
        );
        let err = "PreCompact".parse::<HookEvent>().unwrap_err();
        assert_eq!(err.to_string(), "unknown hook event: PreCompact");
    }

    #[test]
    fn test_event_serializes_pascal_case() {
        let json = serde_json::to_string(&HookEvent::PostToolUse).unwrap();
        assert_eq!(json, "\"PostToolUse\"");
    }
}
