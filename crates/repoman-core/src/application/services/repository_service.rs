//! Repository Service - the single choke point for external-tool calls.
//!
//! Every operation builds an argument vector, runs it through the
//! [`CommandRunner`] port inside the repository directory, and translates a
//! nonzero exit into [`RepoError::OperationFailed`]. No other component
//! spawns the tool.

use std::path::Path;

use tracing::{debug, error, info, instrument};

use crate::{
    application::ports::{CommandRunner, Filesystem},
    domain::{BranchList, OperationResult, RepositoryHandle, ToolInvocation},
    error::{RepoError, RepoResult},
};

/// Program invoked when none is configured.
pub const DEFAULT_TOOL: &str = "git";
/// Remote used by push/pull when the caller omits one.
pub const DEFAULT_REMOTE: &str = "origin";
/// Branch used by push/pull when the caller omits one.
pub const DEFAULT_BRANCH: &str = "main";

/// Wraps all interactions with the external version-control tool.
pub struct RepositoryService {
    handle: RepositoryHandle,
    tool: String,
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
}

impl std::fmt::Debug for RepositoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryService")
            .field("handle", &self.handle)
            .field("tool", &self.tool)
            .finish_non_exhaustive()
    }
}

impl RepositoryService {
    /// Create a service driving `git`, confirming it can be invoked.
    pub fn new(
        handle: RepositoryHandle,
        runner: Box<dyn CommandRunner>,
        filesystem: Box<dyn Filesystem>,
    ) -> RepoResult<Self> {
        Self::with_tool(handle, DEFAULT_TOOL, runner, filesystem)
    }

    /// Create a service driving `tool`.
    ///
    /// Runs `<tool> --version`; fails with [`RepoError::ToolUnavailable`]
    /// when that cannot be executed or exits nonzero.
    #[instrument(skip_all, fields(repo = %handle))]
    pub fn with_tool(
        handle: RepositoryHandle,
        tool: impl Into<String>,
        runner: Box<dyn CommandRunner>,
        filesystem: Box<dyn Filesystem>,
    ) -> RepoResult<Self> {
        let tool = tool.into();

        // Probe from the process directory: the repository path may not exist yet.
        let probe = ToolInvocation::new(&tool, ["--version"]);
        let result = runner.run(&probe).map_err(|e| RepoError::ToolUnavailable {
            tool: tool.clone(),
            reason: e.to_string(),
        })?;

        if !result.success() {
            return Err(RepoError::ToolUnavailable {
                tool,
                reason: result.stderr.trim().to_string(),
            });
        }
        debug!(version = %result.stdout.trim(), "Tool available");

        Ok(Self {
            handle,
            tool,
            runner,
            filesystem,
        })
    }

    pub fn handle(&self) -> &RepositoryHandle {
        &self.handle
    }

    /// Initialize a new repository at the handle's path.
    #[instrument(skip(self), fields(repo = %self.handle))]
    pub fn init_repository(&self) -> RepoResult<()> {
        if self.is_repository() {
            return Err(RepoError::AlreadyExists {
                path: self.handle.root().to_path_buf(),
            });
        }

        self.filesystem
            .create_dir_all(self.handle.root())
            .map_err(|e| RepoError::OperationFailed {
                command: "init".into(),
                stderr: format!("Failed to create repository directory: {e}"),
                exit_code: None,
            })?;

        self.run(["init"])?;
        info!("Initialized repository at {}", self.handle);
        Ok(())
    }

    /// Stage `paths` (relative to the repository root) in one invocation.
    ///
    /// Every path is checked before the tool runs; the first missing file
    /// aborts the whole call.
    #[instrument(skip(self, paths), fields(repo = %self.handle))]
    pub fn add_files<P: AsRef<Path>>(&self, paths: &[P]) -> RepoResult<()> {
        if paths.is_empty() {
            return Err(RepoError::invalid_argument(
                "add",
                "no files specified to add",
            ));
        }

        let mut staged = Vec::with_capacity(paths.len());
        for path in paths {
            let resolved = self.handle.resolve(path);
            if !self.filesystem.exists(&resolved) {
                return Err(RepoError::FileNotFound { path: resolved });
            }
            staged.push(
                self.handle
                    .relativize(&resolved)
                    .to_string_lossy()
                    .into_owned(),
            );
        }

        let listing = staged.join(", ");
        self.run(std::iter::once("add".to_string()).chain(staged))?;
        info!("Added files to staging: {listing}");
        Ok(())
    }

    /// Commit staged changes.
    #[instrument(skip(self), fields(repo = %self.handle))]
    pub fn commit(&self, message: &str) -> RepoResult<()> {
        if message.is_empty() {
            return Err(RepoError::invalid_argument(
                "commit",
                "commit message cannot be empty",
            ));
        }

        self.run(["commit", "-m", message])?;
        info!("Created commit: {message}");
        Ok(())
    }

    /// Push `branch` to `remote`, defaulting to `origin`/`main`.
    #[instrument(skip(self), fields(repo = %self.handle))]
    pub fn push(&self, remote: Option<&str>, branch: Option<&str>) -> RepoResult<()> {
        let (remote, branch) = remote_and_branch(remote, branch);
        self.run(["push", "-u", remote, branch])?;
        info!("Pushed changes to {remote}/{branch}");
        Ok(())
    }

    /// Pull `branch` from `remote`, defaulting to `origin`/`main`.
    #[instrument(skip(self), fields(repo = %self.handle))]
    pub fn pull(&self, remote: Option<&str>, branch: Option<&str>) -> RepoResult<()> {
        let (remote, branch) = remote_and_branch(remote, branch);
        self.run(["pull", remote, branch])?;
        info!("Pulled changes from {remote}/{branch}");
        Ok(())
    }

    /// Create `name` and switch to it in one invocation.
    #[instrument(skip(self), fields(repo = %self.handle))]
    pub fn create_branch(&self, name: &str) -> RepoResult<()> {
        if name.is_empty() {
            return Err(RepoError::invalid_argument(
                "branch",
                "branch name cannot be empty",
            ));
        }

        self.run(["checkout", "-b", name])?;
        info!("Created and switched to branch: {name}");
        Ok(())
    }

    /// Merge `name` into the current branch.
    #[instrument(skip(self), fields(repo = %self.handle))]
    pub fn merge(&self, name: &str) -> RepoResult<()> {
        self.run(["merge", name])?;
        info!("Merged branch: {name}");
        Ok(())
    }

    /// Switch to an existing branch.
    #[instrument(skip(self), fields(repo = %self.handle))]
    pub fn checkout(&self, name: &str) -> RepoResult<()> {
        self.run(["checkout", name])?;
        info!("Switched to branch: {name}");
        Ok(())
    }

    /// List branches, current branch first.
    #[instrument(skip(self), fields(repo = %self.handle))]
    pub fn list_branches(&self) -> RepoResult<BranchList> {
        let result = self.run(["branch"])?;
        let branches = BranchList::parse(&result.stdout);
        info!("Found branches: {}", branches.names().join(", "));
        Ok(branches)
    }

    /// Raw textual status.
    #[instrument(skip(self), fields(repo = %self.handle))]
    pub fn status(&self) -> RepoResult<String> {
        Ok(self.run(["status"])?.stdout)
    }

    /// Whether the repository marker exists. Never invokes the tool.
    pub fn is_repository(&self) -> bool {
        self.filesystem.exists(&self.handle.marker_path())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Run one tool invocation in the repository directory.
    fn run<I, S>(&self, args: I) -> RepoResult<OperationResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = ToolInvocation::new(&self.tool, args).in_dir(self.handle.root());
        debug!(command = %invocation, "Running");

        let result = self
            .runner
            .run(&invocation)
            .map_err(|e| RepoError::OperationFailed {
                command: invocation.command_line(),
                stderr: e.to_string(),
                exit_code: None,
            })?;

        if !result.success() {
            error!(
                "Command failed: {}\n{}",
                invocation.command_line(),
                result.stderr
            );
            return Err(RepoError::OperationFailed {
                command: invocation.command_line(),
                stderr: result.stderr,
                exit_code: result.exit_code,
            });
        }

        Ok(result)
    }
}

fn remote_and_branch<'a>(remote: Option<&'a str>, branch: Option<&'a str>) -> (&'a str, &'a str) {
    (
        remote.filter(|r| !r.is_empty()).unwrap_or(DEFAULT_REMOTE),
        branch.filter(|b| !b.is_empty()).unwrap_or(DEFAULT_BRANCH),
    )
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use mockall::predicate::function;

    use super::*;
    use crate::application::ports::{MockCommandRunner, MockFilesystem};

    const ROOT: &str = "/work/project";

    fn version_ok(runner: &mut MockCommandRunner) {
        runner
            .expect_run()
            .withf(|inv| inv.args() == ["--version"])
            .times(1)
            .returning(|_| Ok(OperationResult::ok("git version 2.43.0\n")));
    }

    fn service(runner: MockCommandRunner, fs: MockFilesystem) -> RepositoryService {
        RepositoryService::new(
            RepositoryHandle::new(ROOT),
            Box::new(runner),
            Box::new(fs),
        )
        .expect("version probe should succeed")
    }

    fn expect_args(runner: &mut MockCommandRunner, expected: &'static [&'static str], stdout: &'static str) {
        runner
            .expect_run()
            .withf(move |inv| {
                inv.args() == expected && inv.cwd() == Some(std::path::Path::new(ROOT))
            })
            .times(1)
            .returning(move |_| Ok(OperationResult::ok(stdout)));
    }

    // ── Initialize ────────────────────────────────────────────────────────

    #[test]
    fn missing_tool_is_tool_unavailable() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "No such file")));

        let err = RepositoryService::new(
            RepositoryHandle::new(ROOT),
            Box::new(runner),
            Box::new(MockFilesystem::new()),
        )
        .unwrap_err();

        assert!(matches!(err, RepoError::ToolUnavailable { ref tool, .. } if tool == "git"));
    }

    #[test]
    fn failing_version_query_is_tool_unavailable() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(OperationResult::new("", "broken install", Some(1))));

        let err = RepositoryService::with_tool(
            RepositoryHandle::new(ROOT),
            "hg",
            Box::new(runner),
            Box::new(MockFilesystem::new()),
        )
        .unwrap_err();

        assert_eq!(
            err,
            RepoError::ToolUnavailable {
                tool: "hg".into(),
                reason: "broken install".into()
            }
        );
    }

    #[test]
    fn version_probe_runs_outside_repository() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|inv| inv.program() == "git" && inv.cwd().is_none())
            .times(1)
            .returning(|_| Ok(OperationResult::ok("git version 2.43.0")));

        assert!(
            RepositoryService::new(
                RepositoryHandle::new(ROOT),
                Box::new(runner),
                Box::new(MockFilesystem::new()),
            )
            .is_ok()
        );
    }

    // ── InitializeRepository ──────────────────────────────────────────────

    #[test]
    fn init_creates_directory_and_runs_init() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["init"], "Initialized empty Git repository");

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .with(function(|p: &Path| p == Path::new(ROOT)))
            .times(1)
            .returning(|_| Ok(()));

        service(runner, fs).init_repository().unwrap();
    }

    #[test]
    fn init_over_existing_marker_fails() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);

        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(function(|p: &Path| p == Path::new("/work/project/.git")))
            .returning(|_| true);
        fs.expect_create_dir_all().never();

        let err = service(runner, fs).init_repository().unwrap_err();
        assert_eq!(
            err,
            RepoError::AlreadyExists {
                path: PathBuf::from(ROOT)
            }
        );
    }

    #[test]
    fn init_directory_failure_is_operation_failed() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));

        let err = service(runner, fs).init_repository().unwrap_err();
        match err {
            RepoError::OperationFailed { command, stderr, .. } => {
                assert_eq!(command, "init");
                assert!(stderr.contains("denied"));
            }
            other => panic!("expected OperationFailed, got {other:?}"),
        }
    }

    // ── AddFiles ──────────────────────────────────────────────────────────

    #[test]
    fn add_empty_list_never_invokes_tool() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);

        let err = service(runner, MockFilesystem::new())
            .add_files::<&str>(&[])
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidArgument { operation: "add", .. }));
    }

    #[test]
    fn add_stages_all_paths_in_order_in_one_call() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["add", "b.txt", "src/a.rs", "LICENSE"], "");

        let mut fs = MockFilesystem::new();
        fs.expect_exists().times(3).returning(|_| true);

        service(runner, fs)
            .add_files(&["b.txt", "src/a.rs", "LICENSE"])
            .unwrap();
    }

    #[test]
    fn add_aborts_on_first_missing_file() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);

        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| !p.ends_with("missing.txt"));

        let err = service(runner, fs)
            .add_files(&["present.txt", "missing.txt", "also-present.txt"])
            .unwrap_err();
        assert_eq!(
            err,
            RepoError::FileNotFound {
                path: PathBuf::from("/work/project/missing.txt")
            }
        );
    }

    #[test]
    fn add_relativizes_absolute_paths_under_root() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["add", "docs/guide.md"], "");

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);

        service(runner, fs)
            .add_files(&["/work/project/docs/guide.md"])
            .unwrap();
    }

    // ── Commit / branch validation ────────────────────────────────────────

    #[test]
    fn empty_commit_message_is_rejected() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);

        let err = service(runner, MockFilesystem::new()).commit("").unwrap_err();
        assert!(matches!(err, RepoError::InvalidArgument { operation: "commit", .. }));
    }

    #[test]
    fn commit_passes_message() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["commit", "-m", "Initial commit"], "");

        service(runner, MockFilesystem::new())
            .commit("Initial commit")
            .unwrap();
    }

    #[test]
    fn empty_branch_name_is_rejected() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);

        let err = service(runner, MockFilesystem::new())
            .create_branch("")
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidArgument { operation: "branch", .. }));
    }

    #[test]
    fn create_branch_switches_in_one_invocation() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["checkout", "-b", "feature"], "");

        service(runner, MockFilesystem::new())
            .create_branch("feature")
            .unwrap();
    }

    // ── Push / Pull ───────────────────────────────────────────────────────

    #[test]
    fn push_defaults_to_origin_main() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["push", "-u", "origin", "main"], "");

        service(runner, MockFilesystem::new()).push(None, None).unwrap();
    }

    #[test]
    fn pull_uses_given_remote_and_branch() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["pull", "upstream", "develop"], "");

        service(runner, MockFilesystem::new())
            .pull(Some("upstream"), Some("develop"))
            .unwrap();
    }

    #[test]
    fn empty_remote_falls_back_to_default() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["pull", "origin", "release"], "");

        service(runner, MockFilesystem::new())
            .pull(Some(""), Some("release"))
            .unwrap();
    }

    // ── Pass-through and error translation ────────────────────────────────

    #[test]
    fn nonzero_exit_becomes_operation_failed() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        runner
            .expect_run()
            .withf(|inv| inv.args() == ["merge", "nope"])
            .returning(|_| {
                Ok(OperationResult::new(
                    "",
                    "merge: nope - not something we can merge",
                    Some(1),
                ))
            });

        let err = service(runner, MockFilesystem::new()).merge("nope").unwrap_err();
        assert_eq!(
            err,
            RepoError::OperationFailed {
                command: "merge nope".into(),
                stderr: "merge: nope - not something we can merge".into(),
                exit_code: Some(1),
            }
        );
    }

    #[test]
    fn runner_failure_mid_session_is_operation_failed() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        runner
            .expect_run()
            .withf(|inv| inv.args() == ["status"])
            .returning(|_| Err(io::Error::new(io::ErrorKind::TimedOut, "timed out after 5s")));

        let err = service(runner, MockFilesystem::new()).status().unwrap_err();
        assert!(
            matches!(err, RepoError::OperationFailed { ref stderr, exit_code: None, .. } if stderr.contains("timed out"))
        );
    }

    #[test]
    fn checkout_is_pass_through() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["checkout", "main"], "");

        service(runner, MockFilesystem::new()).checkout("main").unwrap();
    }

    #[test]
    fn status_returns_raw_stdout() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["status"], "On branch main\nnothing to commit\n");

        let status = service(runner, MockFilesystem::new()).status().unwrap();
        assert_eq!(status, "On branch main\nnothing to commit\n");
    }

    #[test]
    fn list_branches_puts_current_first() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);
        expect_args(&mut runner, &["branch"], "* main\n  feature\n");

        let branches = service(runner, MockFilesystem::new()).list_branches().unwrap();
        assert_eq!(branches.names(), ["main", "feature"]);
    }

    #[test]
    fn is_repository_checks_marker_only() {
        let mut runner = MockCommandRunner::new();
        version_ok(&mut runner);

        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(function(|p: &Path| p == Path::new("/work/project/.git")))
            .times(1)
            .returning(|_| true);

        assert!(service(runner, fs).is_repository());
    }
}
