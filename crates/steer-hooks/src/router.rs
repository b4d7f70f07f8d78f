//! Intent routing: maps a free-text prompt to the helper agent best suited
//! for it.
//!
//! Rules are grouped by helper. Every Codex rule is checked before any Gemini
//! rule, so a prompt that mentions both "debug" and "research" goes to Codex.
//! Inside a block the listed order decides, not where the phrase occurs in the
//! prompt.

use steer_core::config::{DEFAULT_CODEX_TRIGGERS, DEFAULT_GEMINI_TRIGGERS};
use steer_core::RoutingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    /// Deep reasoning: design, debugging, review.
    Codex,
    /// Research, documentation lookups, multimodal input.
    Gemini,
}

impl Helper {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Codex => "codex",
            Self::Gemini => "gemini",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRule {
    pub phrase: String,
    pub helper: Helper,
}

impl TriggerRule {
    pub fn new(phrase: impl AsRef<str>, helper: Helper) -> Self {
        Self {
            phrase: phrase.as_ref().to_lowercase(),
            helper,
        }
    }
}

/// Outcome of routing one prompt. `helper` is `None` and `trigger` empty when
/// nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDecision {
    pub helper: Option<Helper>,
    pub trigger: String,
}

impl RouteDecision {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.helper.is_some()
    }
}

/// Ordered trigger rules, Codex block first. Read-only once built.
#[derive(Debug, Clone)]
pub struct TriggerTable {
    rules: Vec<TriggerRule>,
}

impl TriggerTable {
    /// Builds the table from the two phrase blocks. Phrases are lower-cased;
    /// blank phrases are dropped since they would match every prompt.
    pub fn new<C, G>(codex: C, gemini: G) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let codex = codex.into_iter().map(|p| TriggerRule::new(p, Helper::Codex));
        let gemini = gemini
            .into_iter()
            .map(|p| TriggerRule::new(p, Helper::Gemini));

        let rules = codex
            .chain(gemini)
            .filter(|rule| !rule.phrase.trim().is_empty())
            .collect();

        Self { rules }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(&config.codex_triggers, &config.gemini_triggers)
    }

    pub fn rules(&self) -> &[TriggerRule] {
        &self.rules
    }
}

impl Default for TriggerTable {
    fn default() -> Self {
        Self::new(DEFAULT_CODEX_TRIGGERS, DEFAULT_GEMINI_TRIGGERS)
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntentRouter {
    table: TriggerTable,
}

impl IntentRouter {
    pub fn new(table: TriggerTable) -> Self {
        Self { table }
    }

    /// Returns the first rule, in table order, whose phrase occurs in the
    /// prompt. Case-insensitive. Callers are expected to have applied the
    /// minimum prompt length already.
    pub fn route(&self, prompt: &str) -> RouteDecision {
        let lowered = prompt.to_lowercase();

        self.table
            .rules()
            .iter()
            .find(|rule| lowered.contains(rule.phrase.as_str()))
            .map(|rule| RouteDecision {
                helper: Some(rule.helper),
                trigger: rule.phrase.clone(),
            })
            .unwrap_or_default()
    }
}
