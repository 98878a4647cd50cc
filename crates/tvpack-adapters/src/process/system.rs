//! Process execution through `std::process`.

use std::{
    io::{self, Read, Write},
    process::{Command, Stdio},
    thread,
};

use tracing::{debug, instrument};
use tvpack_core::{
    application::{
        ApplicationError,
        ports::{CommandExecutor, CommandLine, CommandOutput},
    },
    error::PackResult,
};

/// Runs commands synchronously, capturing stdout and stderr.
///
/// Stdin is inherited so SDK password prompts can be answered. With
/// [`echoing`](Self::echoing) the child's output is also copied to our own
/// stdout/stderr as it arrives, so those prompts are visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor {
    echo: bool,
}

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn echoing(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

impl CommandExecutor for SystemCommandExecutor {
    #[instrument(skip(self), fields(command = %command))]
    fn execute(&self, command: &CommandLine) -> PackResult<CommandOutput> {
        let failed = |reason: String| ApplicationError::ExecutionFailed {
            command: command.to_string(),
            reason,
        };

        let program = which::which(&command.program)
            .map_err(|e| failed(format!("'{}' was not found on PATH: {e}", command.program)))?;
        debug!(program = %program.display(), "Resolved executable");

        let mut process = Command::new(&program);
        process
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &command.current_dir {
            process.current_dir(dir);
        }

        let (status, stdout, stderr) = if self.echo {
            let mut child = process.spawn().map_err(|e| failed(e.to_string()))?;
            let out = child
                .stdout
                .take()
                .map(|s| thread::spawn(move || tee(s, io::stdout())));
            let err = child
                .stderr
                .take()
                .map(|s| thread::spawn(move || tee(s, io::stderr())));
            let status = child.wait().map_err(|e| failed(e.to_string()))?;
            let collect = |handle: Option<thread::JoinHandle<Vec<u8>>>| {
                handle.and_then(|h| h.join().ok()).unwrap_or_default()
            };
            (status, collect(out), collect(err))
        } else {
            let output = process.output().map_err(|e| failed(e.to_string()))?;
            (output.status, output.stdout, output.stderr)
        };

        let result = CommandOutput {
            exit_code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        };
        debug!(exit_code = ?result.exit_code, "Command finished");
        Ok(result)
    }
}

/// Copy `source` to `sink` chunk by chunk, returning everything read.
///
/// Flushes after each chunk so prompts without a trailing newline show up.
/// Sink errors are ignored; capture continues.
fn tee(mut source: impl Read, mut sink: impl Write) -> Vec<u8> {
    let mut captured = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                captured.extend_from_slice(&buf[..n]);
                let _ = sink.write_all(&buf[..n]).and_then(|()| sink.flush());
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!(error = %e, "Stopped reading child output");
                break;
            }
        }
    }
    captured
}
