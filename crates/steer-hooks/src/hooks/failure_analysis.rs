use steer_core::{Annotation, FailureAnalysisConfig, HookEvent, HookInput, Result};
use tracing::debug;

use crate::emitter::{emit, Classification};
use crate::failure::{FailureClassifier, FailurePatternTable};
use crate::hook::Hook;

pub const HOOK_NAME: &str = "failure-analysis";

/// Only shell executions carry command output worth classifying.
pub const BASH_TOOL: &str = "Bash";

/// Suggests delegating a debugging pass after a test or build run fails in a
/// non-trivial way.
#[derive(Default)]
pub struct FailureAnalysisHook {
    classifier: FailureClassifier,
}

impl FailureAnalysisHook {
    pub fn new(classifier: FailureClassifier) -> Self {
        Self { classifier }
    }

    pub fn from_config(config: &FailureAnalysisConfig) -> Result<Self> {
        let table = FailurePatternTable::from_config(config)?;
        Ok(Self::new(FailureClassifier::new(table)))
    }
}

impl Hook for FailureAnalysisHook {
    fn name(&self) -> &str {
        HOOK_NAME
    }

    fn events(&self) -> &[HookEvent] {
        &[HookEvent::PostToolUse]
    }

    fn execute(&self, _event: HookEvent, input: &HookInput) -> Option<Annotation> {
        if input.tool_name.as_deref() != Some(BASH_TOOL) {
            return None;
        }

        let command = input.command().unwrap_or_default();
        let output = input.tool_output_text();
        let verdict = self.classifier.classify(command, &output);
        debug!(
            command,
            complex = verdict.is_complex,
            reason = %verdict.reason,
            "classified command output"
        );

        emit(Classification::Failure(&verdict))
    }
}
