use steer_core::config::DEFAULT_MIN_PROMPT_LENGTH;
use steer_core::{Annotation, HookEvent, HookInput, RoutingConfig};
use tracing::debug;

use crate::emitter::{emit, Classification};
use crate::hook::Hook;
use crate::router::{IntentRouter, TriggerTable};

pub const HOOK_NAME: &str = "agent-router";

/// Suggests a helper agent when a submitted prompt matches a trigger phrase.
pub struct AgentRouterHook {
    router: IntentRouter,
    min_prompt_length: usize,
}

impl AgentRouterHook {
    pub fn new(router: IntentRouter, min_prompt_length: usize) -> Self {
        Self {
            router,
            min_prompt_length,
        }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(
            IntentRouter::new(TriggerTable::from_config(config)),
            config.min_prompt_length,
        )
    }

    /// Short prompts ("yes", "go on") carry no intent worth routing.
    fn is_too_short(&self, prompt: &str) -> bool {
        prompt.chars().count() < self.min_prompt_length
    }
}

impl Default for AgentRouterHook {
    fn default() -> Self {
        Self::new(IntentRouter::default(), DEFAULT_MIN_PROMPT_LENGTH)
    }
}

impl Hook for AgentRouterHook {
    fn name(&self) -> &str {
        HOOK_NAME
    }

    fn events(&self) -> &[HookEvent] {
        &[HookEvent::UserPromptSubmit]
    }

    fn execute(&self, _event: HookEvent, input: &HookInput) -> Option<Annotation> {
        let prompt = input.prompt_text();
        if self.is_too_short(prompt) {
            return None;
        }

        let decision = self.router.route(prompt);
        debug!(
            helper = decision.helper.map_or("none", |h| h.name()),
            trigger = %decision.trigger,
            "routed prompt"
        );

        emit(Classification::Route(&decision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt_input(prompt: &str) -> HookInput {
        HookInput {
            prompt: Some(prompt.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_routes_long_prompt() {
        let hook = AgentRouterHook::default();
        let annotation = hook
            .execute(
                HookEvent::UserPromptSubmit,
                &prompt_input("please debug the login flow"),
            )
            .unwrap();
        assert!(annotation.advisory.contains("Detected 'debug'"));
        assert!(annotation.advisory.contains("Codex CLI"));
    }

    #[test]
    fn test_short_prompt_is_skipped() {
        let hook = AgentRouterHook::default();
        // Nine characters, contains a trigger.
        assert!(hook
            .execute(HookEvent::UserPromptSubmit, &prompt_input("debug it!"))
            .is_none());
        // Exactly ten characters passes the gate.
        assert!(hook
            .execute(HookEvent::UserPromptSubmit, &prompt_input("debug it!!"))
            .is_some());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let hook = AgentRouterHook::default();
        // Five characters, fifteen bytes.
        assert!(hook
            .execute(HookEvent::UserPromptSubmit, &prompt_input("デバッグ!"))
            .is_none());
    }

    #[test]
    fn test_missing_prompt_is_skipped() {
        let hook = AgentRouterHook::default();
        assert!(hook
            .execute(HookEvent::UserPromptSubmit, &HookInput::default())
            .is_none());
    }

    #[test]
    fn test_unmatched_prompt_emits_nothing() {
        let hook = AgentRouterHook::default();
        assert!(hook
            .execute(
                HookEvent::UserPromptSubmit,
                &prompt_input("hello there, how are you")
            )
            .is_none());
    }

    #[test]
    fn test_from_config_uses_custom_threshold_and_triggers() {
        let config = RoutingConfig {
            enabled: true,
            min_prompt_length: 3,
            codex_triggers: vec!["why".to_string()],
            gemini_triggers: vec![],
        };
        let hook = AgentRouterHook::from_config(&config);
        let annotation = hook
            .execute(HookEvent::UserPromptSubmit, &prompt_input("why?"))
            .unwrap();
        assert!(annotation.advisory.contains("Detected 'why'"));
    }
}
