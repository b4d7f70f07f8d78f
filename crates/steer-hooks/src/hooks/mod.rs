pub mod agent_router;
pub mod failure_analysis;

pub use agent_router::AgentRouterHook;
pub use failure_analysis::FailureAnalysisHook;
