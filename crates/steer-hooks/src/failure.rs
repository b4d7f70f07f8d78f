//! Failure-severity classification for test, build, lint and typecheck
//! output.
//!
//! Output is "complex" when the failure signals fire at least three times in
//! total, or at least once next to an assertion or type-error marker. Known
//! setup errors (missing module, missing script, ...) short-circuit to a
//! negative verdict before any signal is counted.

use regex::{Regex, RegexBuilder};
use steer_core::config::{
    DEFAULT_FAILURE_PATTERNS, DEFAULT_SIMPLE_ERRORS, DEFAULT_TEST_BUILD_COMMANDS,
};
use steer_core::{FailureAnalysisConfig, Result, SteerError};

/// Markers that make a single failure worth escalating. Checked against the
/// lower-cased output.
pub const SECONDARY_MARKERS: &[&str] = &["expect(", "assertion", "typeerror", "ts2"];

/// Total signal matches at which output counts as complex on its own.
pub const MULTIPLE_FAILURE_THRESHOLD: usize = 3;

pub const REASON_TEST_OR_TYPE_ERROR: &str = "Test failure or type error";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationVerdict {
    pub is_complex: bool,
    pub reason: String,
}

impl ClassificationVerdict {
    pub fn complex(reason: impl Into<String>) -> Self {
        Self {
            is_complex: true,
            reason: reason.into(),
        }
    }

    pub fn simple() -> Self {
        Self::default()
    }
}

/// Recognized commands, failure signals and simple-error exclusions. Patterns
/// are compiled once here; the table is read-only afterwards.
#[derive(Debug, Clone)]
pub struct FailurePatternTable {
    commands: Vec<String>,
    signals: Vec<Regex>,
    simple_errors: Vec<String>,
}

impl FailurePatternTable {
    pub fn new<C, P, S>(commands: C, patterns: P, simple_errors: S) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let signals = patterns
            .into_iter()
            .map(|p| compile_signal(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            commands: commands
                .into_iter()
                .map(|c| c.as_ref().to_lowercase())
                .filter(|c| !c.trim().is_empty())
                .collect(),
            signals,
            simple_errors: simple_errors
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }

    pub fn from_config(config: &FailureAnalysisConfig) -> Result<Self> {
        Self::new(&config.commands, &config.patterns, &config.simple_errors)
    }

    pub fn is_recognized_command(&self, command: &str) -> bool {
        let lowered = command.to_lowercase();
        self.commands.iter().any(|c| lowered.contains(c.as_str()))
    }

    /// Case-sensitive, verbatim.
    pub fn is_simple_error(&self, output: &str) -> bool {
        self.simple_errors.iter().any(|s| output.contains(s.as_str()))
    }

    /// Sum of non-overlapping matches over every signal. Overlapping signals
    /// count the same text more than once ("FAILED" hits both `FAILED` and
    /// `failed`).
    pub fn failure_count(&self, output: &str) -> usize {
        self.signals
            .iter()
            .map(|re| re.find_iter(output).count())
            .sum()
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }
}

impl Default for FailurePatternTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_TEST_BUILD_COMMANDS,
            DEFAULT_FAILURE_PATTERNS,
            DEFAULT_SIMPLE_ERRORS,
        )
        .expect("built-in failure patterns are valid")
    }
}

fn compile_signal(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| SteerError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn has_secondary_marker(output: &str) -> bool {
    let lowered = output.to_lowercase();
    SECONDARY_MARKERS.iter().any(|m| lowered.contains(m))
}

#[derive(Debug, Clone, Default)]
pub struct FailureClassifier {
    table: FailurePatternTable,
}

impl FailureClassifier {
    pub fn new(table: FailurePatternTable) -> Self {
        Self { table }
    }

    pub fn classify(&self, command: &str, output: &str) -> ClassificationVerdict {
        if !self.table.is_recognized_command(command) {
            return ClassificationVerdict::simple();
        }

        if self.table.is_simple_error(output) {
            return ClassificationVerdict::simple();
        }

        let failure_count = self.table.failure_count(output);

        if failure_count >= MULTIPLE_FAILURE_THRESHOLD {
            return ClassificationVerdict::complex(format!(
                "Multiple failures detected ({} issues)",
                failure_count
            ));
        }

        if failure_count >= 1 && has_secondary_marker(output) {
            return ClassificationVerdict::complex(REASON_TEST_OR_TYPE_ERROR);
        }

        ClassificationVerdict::simple()
    }
}
