use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use steer_telemetry::TelemetryConfig;

use crate::error::{Result, SteerError};

/// Config file looked up under the project's `.claude/` directory.
pub const CONFIG_FILENAME: &str = "steer.yml";

pub const DEFAULT_MIN_PROMPT_LENGTH: usize = 10;
pub const DEFAULT_LINT_RUNNER: &str = "npx";
pub const DEFAULT_LINT_TIMEOUT_SECS: u64 = 30;

/// Reasoning/debugging intents, checked before the research block.
pub const DEFAULT_CODEX_TRIGGERS: &[&str] = &[
    "design",
    "architecture",
    "architect",
    "debug",
    "error",
    "bug",
    "not working",
    "fails",
    "compare",
    "trade-off",
    "tradeoff",
    "which is better",
    "how to implement",
    "implementation",
    "refactor",
    "simplify",
    "review",
    "check this",
    "think",
    "analyze",
    "deeply",
];

pub const DEFAULT_GEMINI_TRIGGERS: &[&str] = &[
    "research",
    "investigate",
    "look up",
    "find out",
    "pdf",
    "video",
    "audio",
    "image",
    "entire codebase",
    "whole repository",
    "latest",
    "documentation",
    "docs",
    "library",
    "package",
    "framework",
];

pub const DEFAULT_TEST_BUILD_COMMANDS: &[&str] = &[
    "npm test",
    "npm run test",
    "npm run build",
    "npm run lint",
    "npm run typecheck",
    "npx vitest",
    "npx jest",
    "npx tsc",
    "npx eslint",
    "pnpm test",
    "pnpm run test",
    "pnpm run build",
    "yarn test",
    "yarn run test",
    "yarn run build",
    "bun test",
    "bun run test",
    "make test",
    "make build",
];

pub const DEFAULT_FAILURE_PATTERNS: &[&str] = &[
    r"FAILED",
    r"ERROR",
    r"error\[",
    r"Error:",
    r"failed",
    r"error:",
    r"TypeError",
    r"ReferenceError",
    r"SyntaxError",
    r"Cannot find module",
    r"Cannot find name",
    r"TS\d{4}:",
    r"AssertionError",
    r"expect\(.+\)\..+\(.+\)",
    r"FAIL\s+",
    r"✖|×",
    r"ERR!",
];

/// Setup problems that a reinstall or a typo fix resolves.
pub const DEFAULT_SIMPLE_ERRORS: &[&str] = &[
    "Cannot find module",
    "command not found",
    "No such file or directory",
    "ENOENT",
    "npm ERR! missing script",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub failure_analysis: FailureAnalysisConfig,

    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub enabled: bool,
    pub min_prompt_length: usize,
    pub codex_triggers: Vec<String>,
    pub gemini_triggers: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_prompt_length: DEFAULT_MIN_PROMPT_LENGTH,
            codex_triggers: owned(DEFAULT_CODEX_TRIGGERS),
            gemini_triggers: owned(DEFAULT_GEMINI_TRIGGERS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FailureAnalysisConfig {
    pub enabled: bool,
    pub commands: Vec<String>,
    pub patterns: Vec<String>,
    pub simple_errors: Vec<String>,
}

impl Default for FailureAnalysisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            commands: owned(DEFAULT_TEST_BUILD_COMMANDS),
            patterns: owned(DEFAULT_FAILURE_PATTERNS),
            simple_errors: owned(DEFAULT_SIMPLE_ERRORS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    pub enabled: bool,
    pub timeout_secs: u64,
    /// Package runner used to launch prettier, eslint and tsc.
    pub runner: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: DEFAULT_LINT_TIMEOUT_SECS,
            runner: DEFAULT_LINT_RUNNER.to_string(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SteerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content, path)
    }

    fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        // An empty file is a valid "use the defaults" config.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(content).map_err(|source| SteerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the config for one hook invocation.
    ///
    /// An explicit path must exist. Otherwise `<project>/.claude/steer.yml` and
    /// `./.claude/steer.yml` are tried in turn, falling back to defaults.
    pub fn load(explicit: Option<&Path>, project_dir: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::discover(project_dir) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn discover(project_dir: Option<&Path>) -> Option<PathBuf> {
        project_dir
            .map(Self::path_in)
            .into_iter()
            .chain(std::iter::once(Self::path_in(Path::new("."))))
            .find(|p| p.is_file())
    }

    /// Location of the config file inside a project directory.
    pub fn path_in(project_dir: &Path) -> PathBuf {
        project_dir.join(".claude").join(CONFIG_FILENAME)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.routing.enabled);
        assert_eq!(config.routing.min_prompt_length, 10);
        assert_eq!(config.routing.codex_triggers.first().unwrap(), "design");
        assert_eq!(config.routing.gemini_triggers.last().unwrap(), "framework");
        assert_eq!(config.failure_analysis.patterns.len(), 17);
        assert_eq!(config.lint.timeout_secs, 30);
        assert_eq!(config.lint.runner, "npx");
        assert_eq!(config.telemetry.level, "warn");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        let parsed: Config = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
routing:
  enabled: false
  codex_triggers: ["bisect"]
lint:
  timeout_secs: 5
"#;
        let parsed: Config = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(!parsed.routing.enabled);
        assert_eq!(parsed.routing.codex_triggers, vec!["bisect".to_string()]);
        assert_eq!(parsed.routing.gemini_triggers.len(), DEFAULT_GEMINI_TRIGGERS.len());
        assert_eq!(parsed.routing.min_prompt_length, 10);
        assert_eq!(parsed.lint.timeout_secs, 5);
        assert!(parsed.lint.enabled);
        assert!(parsed.failure_analysis.enabled);
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("steer.yml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.yml")), None).unwrap_err();
        assert!(matches!(err, SteerError::ConfigRead { .. }));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("steer.yml");
        fs::write(&path, "routing: [not, a, map").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, SteerError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_discovers_project_config() {
        let dir = TempDir::new().unwrap();
        let path = Config::path_in(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "failure_analysis:\n  enabled: false\n").unwrap();

        let config = Config::load(None, Some(dir.path())).unwrap();
        assert!(!config.failure_analysis.enabled);
    }
}
