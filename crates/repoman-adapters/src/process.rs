//! Subprocess adapter for the [`CommandRunner`] port.

use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

use repoman_core::{application::ports::CommandRunner, domain::{OperationResult, ToolInvocation}};

/// Runs invocations as child processes and captures their output.
///
/// Stdin is closed. Output is decoded as UTF-8, replacing invalid
/// sequences. With a timeout set, a child that outlives it is killed and the
/// run fails with [`io::ErrorKind::TimedOut`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Runner that waits for children indefinitely.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn command(invocation: &ToolInvocation) -> Command {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = invocation.cwd() {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn wait_with_timeout(mut child: Child, timeout: Duration) -> io::Result<OperationResult> {
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("stdout was not piped"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("stderr was not piped"))?;

        // Drain both pipes while waiting so a chatty child cannot block.
        let stdout_handle = thread::spawn(move || read_stream(stdout));
        let stderr_handle = thread::spawn(move || read_stream(stderr));

        let status = match child.wait_timeout(timeout)? {
            Some(status) => status,
            None => {
                warn!(
                    timeout_secs = timeout.as_secs(),
                    "command timed out, killing"
                );
                child.kill()?;
                child.wait()?;
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("timed out after {}s", timeout.as_secs()),
                ));
            }
        };

        let stdout = join_output(stdout_handle)?;
        let stderr = join_output(stderr_handle)?;
        Ok(OperationResult::new(
            decode(&stdout),
            decode(&stderr),
            status.code(),
        ))
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %invocation))]
    fn run(&self, invocation: &ToolInvocation) -> io::Result<OperationResult> {
        let mut cmd = Self::command(invocation);

        debug!("spawning child process");
        let result = match self.timeout {
            None => cmd.output().map(|output| {
                OperationResult::new(
                    decode(&output.stdout),
                    decode(&output.stderr),
                    output.status.code(),
                )
            }),
            Some(timeout) => cmd
                .spawn()
                .and_then(|child| Self::wait_with_timeout(child, timeout)),
        };

        match &result {
            Ok(r) => debug!(exit_code = ?r.exit_code, "command finished"),
            Err(e) => error!(err = %e, "failed to run command"),
        }
        result
    }
}

fn read_stream<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

fn join_output(handle: thread::JoinHandle<io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(io::Error::other("output reader thread panicked")),
    }
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
