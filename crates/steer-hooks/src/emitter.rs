use steer_core::{Annotation, HookEvent};

use crate::failure::ClassificationVerdict;
use crate::router::{Helper, RouteDecision};

/// A classifier result waiting to be turned into an annotation.
#[derive(Debug, Clone, Copy)]
pub enum Classification<'a> {
    Route(&'a RouteDecision),
    Failure(&'a ClassificationVerdict),
}

impl Helper {
    /// Fixed advice naming how to hand the task to this helper.
    pub fn invocation_hint(&self) -> &'static str {
        match self {
            Self::Codex => {
                "Codex CLI's deep reasoning capabilities. Consider: \
                 `codex exec --model gpt-5.2-codex --sandbox read-only --full-auto \
                 \"{task description}\"` for design decisions, debugging, or complex analysis."
            }
            Self::Gemini => {
                "Gemini CLI's research capabilities. Consider: \
                 `gemini -p \"Research: {topic}\" 2>/dev/null` \
                 for documentation, library research, or multimodal content."
            }
        }
    }
}

const DEBUG_DELEGATION_HINT: &str = "Consider consulting Codex for debugging analysis. \
     **Recommended**: Use Task tool with subagent_type='general-purpose' \
     to consult Codex with full error context and preserve main context.";

/// Builds the advisory for a positive result. Negative results produce `None`
/// and the caller prints nothing.
pub fn emit(classification: Classification<'_>) -> Option<Annotation> {
    match classification {
        Classification::Route(decision) => {
            let helper = decision.helper?;
            Some(Annotation::new(
                HookEvent::UserPromptSubmit,
                format!(
                    "[Agent Routing] Detected '{}' - this task may benefit from {}",
                    decision.trigger,
                    helper.invocation_hint()
                ),
            ))
        }
        Classification::Failure(verdict) => {
            if !verdict.is_complex {
                return None;
            }
            Some(Annotation::new(
                HookEvent::PostToolUse,
                format!(
                    "[Codex Debug Suggestion] {}. {}",
                    verdict.reason, DEBUG_DELEGATION_HINT
                ),
            ))
        }
    }
}
