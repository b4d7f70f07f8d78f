//! Advisory classifiers for coding-assistant hook events.
//!
//! [`IntentRouter`] suggests a helper agent for a submitted prompt and
//! [`FailureClassifier`] decides whether test or build output is worth a
//! dedicated debugging pass. Both are pure functions over static tables built
//! once from [`steer_core::Config`]; [`emit`] turns a positive result into the
//! annotation the host runtime consumes.

pub mod emitter;
pub mod failure;
pub mod hook;
pub mod hooks;
pub mod registry;
pub mod router;

pub use emitter::{emit, Classification};
pub use failure::{ClassificationVerdict, FailureClassifier, FailurePatternTable};
pub use hook::Hook;
pub use hooks::{AgentRouterHook, FailureAnalysisHook};
pub use registry::{default_hooks, HookRegistry};
pub use router::{Helper, IntentRouter, RouteDecision, TriggerRule, TriggerTable};
