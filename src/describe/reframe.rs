use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use super::DescribeSource;
use crate::error::DescribeError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to keep reading the pipes once the child is gone. Processes
/// the runner started may still hold them open.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Runs `<program> -C <config> -c <suite> --describe` and returns its
/// standard output.
#[derive(Debug, Clone)]
pub struct ReframeDescriber {
    program: String,
    suite_path: PathBuf,
    timeout: Duration,
}

impl ReframeDescriber {
    pub fn new(
        program: impl Into<String>,
        suite_path: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            suite_path: suite_path.into(),
            timeout,
        }
    }

    pub fn command(&self, config_file: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-C")
            .arg(config_file)
            .arg("-c")
            .arg(&self.suite_path)
            .arg("--describe");
        cmd
    }

    fn wait(&self, child: &mut Child) -> Result<Option<ExitStatus>, DescribeError> {
        let started_at = Instant::now();
        loop {
            let polled = child.try_wait().map_err(|source| DescribeError::Wait {
                program: self.program.clone(),
                source,
            })?;
            if let Some(status) = polled {
                return Ok(Some(status));
            }
            if started_at.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl DescribeSource for ReframeDescriber {
    fn describe(&self, config_file: &Path) -> Result<String, DescribeError> {
        let mut cmd = self.command(config_file);
        tracing::debug!("Running command: {cmd:?}");

        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| DescribeError::spawn(&self.program, source))?;

        let stdout_handle = child.stdout.take().map(spawn_reader);
        let stderr_handle = child.stderr.take().map(spawn_reader);

        let status = self.wait(&mut child)?;
        let deadline = Instant::now() + DRAIN_GRACE;
        let stdout = drain_reader(stdout_handle, deadline, "stdout");
        let stderr = drain_reader(stderr_handle, deadline, "stderr");

        let Some(status) = status else {
            return Err(DescribeError::timeout(&self.program, self.timeout.as_secs()));
        };

        for line in stderr.lines() {
            tracing::debug!("{}: {line}", self.program);
        }

        if !status.success() {
            return Err(DescribeError::non_zero_exit(
                &self.program,
                status.code(),
                stderr.trim(),
            ));
        }
        if stdout.trim().is_empty() {
            return Err(DescribeError::empty_output(&self.program));
        }

        Ok(stdout)
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut chunk = [0u8; 8192];
        loop {
            match pipe.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    if sender.send(chunk[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    });
    receiver
}

/// Collects whatever the reader produced until EOF or `deadline`. A reader
/// still blocked at the deadline is abandoned.
fn drain_reader(reader: Option<Receiver<Vec<u8>>>, deadline: Instant, stream: &str) -> String {
    let Some(reader) = reader else {
        return String::new();
    };

    let mut buffer = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match reader.recv_timeout(remaining) {
            Ok(chunk) => buffer.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    "Describe {stream} still open after the command ended, ignoring the rest"
                );
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
