use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

pub const MAX_PATH_LENGTH: usize = 4096;

pub const LINTABLE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mts", ".cts"];

/// Extensions that also get a `tsc` pass.
pub const TYPED_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".mts", ".cts"];

const TAG: &str = "[lint-on-save]";

/// Rejects empty, oversized, and parent-traversing paths.
pub fn validate_path(file_path: &str) -> bool {
    !file_path.is_empty() && file_path.len() <= MAX_PATH_LENGTH && !file_path.contains("..")
}

pub fn is_lintable(file_path: &str) -> bool {
    LINTABLE_EXTENSIONS.iter().any(|ext| file_path.ends_with(ext))
}

pub fn is_typed(file_path: &str) -> bool {
    TYPED_EXTENSIONS.iter().any(|ext| file_path.ends_with(ext))
}

/// Path relative to the project when the file lives inside it.
pub fn display_path(file_path: &str, project_dir: &Path) -> String {
    Path::new(file_path)
        .strip_prefix(project_dir)
        .map(|rel| rel.display().to_string())
        .unwrap_or_else(|_| file_path.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl StepOutput {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message.into(),
        }
    }

    fn stderr_or_stdout(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }

    fn stdout_or_stderr(&self) -> &str {
        if self.stdout.is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub display_path: String,
    pub issues: Vec<String>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn print(&self) {
        if self.is_clean() {
            println!("{} OK: {} passed all checks", TAG, self.display_path);
            return;
        }

        eprintln!("{} Issues found in {}:", TAG.yellow(), self.display_path);
        for issue in &self.issues {
            eprintln!("{}", issue);
        }
        eprintln!("\nPlease review and fix these issues.");
    }
}

/// Runs the formatter, linter and type checker over a freshly edited file.
pub struct LintOnSave {
    project_dir: PathBuf,
    timeout: Duration,
    runner: String,
}

impl LintOnSave {
    pub fn new(
        project_dir: impl Into<PathBuf>,
        timeout: Duration,
        runner: impl Into<String>,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            timeout,
            runner: runner.into(),
        }
    }

    pub async fn run_step(&self, args: &[&str]) -> StepOutput {
        if which::which(&self.runner).is_err() {
            return StepOutput::failed(format!("Command not found: {}", self.runner));
        }

        let child = Command::new(&self.runner)
            .args(args)
            .current_dir(&self.project_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        match timeout(self.timeout, child).await {
            Err(_) => StepOutput::failed("Command timed out"),
            Ok(Err(e)) => StepOutput::failed(e.to_string()),
            Ok(Ok(output)) => StepOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            },
        }
    }

    pub async fn check(&self, file_path: &str) -> LintReport {
        let mut issues = Vec::new();

        let prettier = self.run_step(&["prettier", "--write", file_path]).await;
        debug!(success = prettier.success, "prettier finished");
        if !prettier.success {
            issues.push(format!(
                "prettier format failed:\n{}",
                prettier.stderr_or_stdout()
            ));
        }

        let eslint = self.run_step(&["eslint", "--fix", file_path]).await;
        debug!(success = eslint.success, "eslint finished");
        if !eslint.success {
            let out = eslint.stdout_or_stderr();
            if !out.trim().is_empty() {
                issues.push(format!("eslint issues:\n{}", out));
            }
        }

        if is_typed(file_path) {
            let tsc = self.run_step(&["tsc", "--noEmit", "--skipLibCheck"]).await;
            debug!(success = tsc.success, "tsc finished");
            if !tsc.success {
                let out = tsc.stdout_or_stderr();
                if !out.trim().is_empty() {
                    issues.push(format!("tsc type check issues:\n{}", out));
                }
            }
        }

        LintReport {
            display_path: display_path(file_path, &self.project_dir),
            issues,
        }
    }
}
