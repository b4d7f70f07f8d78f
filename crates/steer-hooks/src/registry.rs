use steer_core::{Annotation, Config, HookEvent, HookInput, Result};
use tracing::debug;

use crate::hook::Hook;
use crate::hooks::{AgentRouterHook, FailureAnalysisHook};

/// Hooks in registration order.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn Hook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn Hook>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    /// Runs every hook subscribed to `event`. When more than one produces an
    /// advisory they are joined with a blank line, in registration order.
    pub fn execute_hooks(&self, event: HookEvent, input: &HookInput) -> Option<Annotation> {
        let advisories: Vec<String> = self
            .hooks
            .iter()
            .filter(|hook| hook.handles(event))
            .filter_map(|hook| {
                let annotation = hook.execute(event, input)?;
                debug!(hook = hook.name(), %event, "hook produced advisory");
                Some(annotation.advisory)
            })
            .collect();

        if advisories.is_empty() {
            return None;
        }

        Some(Annotation::new(event, advisories.join("\n\n")))
    }
}

/// Builds the registry described by `config`. Disabled hooks are left out.
///
/// Fails only when a configured failure pattern is not a valid regex.
pub fn default_hooks(config: &Config) -> Result<HookRegistry> {
    let mut registry = HookRegistry::new();

    if config.routing.enabled {
        registry.register(Box::new(AgentRouterHook::from_config(&config.routing)));
    }

    if config.failure_analysis.enabled {
        registry.register(Box::new(FailureAnalysisHook::from_config(
            &config.failure_analysis,
        )?));
    }

    Ok(registry)
}
