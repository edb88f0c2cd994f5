use std::fmt;
use std::path::{Path, PathBuf};

/// One external-tool invocation: program, argument vector, working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ToolInvocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    /// Run inside `dir` instead of the current process directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Arguments joined by spaces, as reported in failures and logs.
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.command_line())
    }
}

/// Captured outcome of a single invocation. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationResult {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl OperationResult {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Shorthand for a clean exit with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(stdout, "", Some(0))
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
