use steer_core::{Annotation, HookEvent, HookInput};

/// A classifier wired to host events.
///
/// `execute` is total: a hook that has nothing to say, or cannot read what it
/// needs from the payload, returns `None`.
pub trait Hook: Send + Sync {
    fn name(&self) -> &str;

    fn events(&self) -> &[HookEvent];

    fn execute(&self, event: HookEvent, input: &HookInput) -> Option<Annotation>;

    fn handles(&self, event: HookEvent) -> bool {
        self.events().contains(&event)
    }
}
