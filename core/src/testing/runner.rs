use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use tokio::process::Command;

use super::result::ExecutionResult;
use crate::error::{Error, Result};

/// Spawns the subject once per input file, with that file as its stdin.
#[derive(Debug, Clone)]
pub struct TestRunner {
    executable: PathBuf,
    time_limit: Option<Duration>,
}

impl TestRunner {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            time_limit: None,
        }
    }

    pub fn time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn get_executable(&self) -> &Path {
        &self.executable
    }

    pub fn get_time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Runs the subject to completion and returns both output streams in full.
    ///
    /// Fails with [`Error::InputNotFound`] before spawning anything if `input`
    /// does not exist, and with [`Error::Timeout`] if the time limit elapses first.
    /// On unix the subject runs in its own process group, and a timeout kills the
    /// whole group, including anything the subject forked.
    pub async fn execute(&self, input: impl AsRef<Path>) -> Result<ExecutionResult> {
        let input = input.as_ref();
        if !input.exists() {
            return Err(Error::InputNotFound {
                path: input.to_owned(),
            });
        }
        let input_file = File::open(input).map_err(|source| Error::InputUnreadable {
            path: input.to_owned(),
            source,
        })?;

        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        let mut proc = self
            .command()
            .stdin(Stdio::from(input_file))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::Spawn {
                program: self.executable.clone(),
                source,
            })?;
        let mut stdout = proc.stdout.take().ok_or_else(|| closed_pipe("stdout"))?;
        let mut stderr = proc.stderr.take().ok_or_else(|| closed_pipe("stderr"))?;

        let start_at = tokio::time::Instant::now();
        let res = {
            let fut = async {
                tokio::try_join!(
                    tokio::io::copy(&mut stdout, &mut stdout_buf),
                    tokio::io::copy(&mut stderr, &mut stderr_buf),
                    proc.wait(),
                )
            };
            match self.time_limit {
                Some(limit) => tokio::time::timeout(limit, fut).await.ok(),
                None => Some(fut.await),
            }
        };
        let execution_time = start_at.elapsed();

        match res {
            None => {
                #[cfg(unix)]
                if let Some(pid) = proc.id() {
                    kill_process_group(pid);
                }
                proc.kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill timed-out process: {:#}", e));
                Err(Error::Timeout {
                    input: input.to_owned(),
                    // `res` is only `None` when a limit was set
                    limit: self.time_limit.unwrap_or_default(),
                })
            }
            Some(Err(e)) => Err(Error::Communicate(e)),
            Some(Ok((_, _, status))) => {
                log::debug!(
                    "{} exited with {} after {}ms",
                    input.to_string_lossy(),
                    status,
                    execution_time.as_millis()
                );
                Ok(ExecutionResult {
                    stdout: stdout_buf,
                    stderr: stderr_buf,
                    status,
                    execution_time,
                })
            }
        }
    }

    fn command(&self) -> Command {
        #[allow(unused_mut)]
        let mut cmd = std::process::Command::new(&self.executable);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt as _;
            cmd.process_group(0);
        }
        Command::from(cmd)
    }
}

#[cfg(unix)]
fn kill_process_group(pgid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    if let Err(e) = killpg(Pid::from_raw(pgid as i32), Signal::SIGKILL) {
        log::warn!("Failed to kill process group {}: {}", pgid, e);
    }
}

fn closed_pipe(name: &str) -> Error {
    Error::Communicate(io::Error::new(
        io::ErrorKind::BrokenPipe,
        format!("{} of the subject is not captured", name),
    ))
}
