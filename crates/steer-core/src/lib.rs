pub mod config;
pub mod error;
pub mod event;
pub mod types;

pub use config::{Config, FailureAnalysisConfig, LintConfig, RoutingConfig};
pub use error::{Result, SteerError};
pub use event::{HookEvent, HookEventParseError};
pub use steer_telemetry::TelemetryConfig;
pub use types::{Annotation, HookInput, HookOutput, HookSpecificOutput};
