//! Subprocess execution for external toolchains.
//!
//! Toolchain output is streamed to the operator as it arrives while stderr
//! is also captured, so a failing stage can report the tool's diagnostics.

use std::{io, process::ExitStatus, process::Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Number of trailing stderr lines kept in error reports.
const MAX_DIAGNOSTIC_LINES: usize = 40;

/// Result of a streamed subprocess run
#[derive(Debug)]
pub struct CommandOutput {
    /// Exit status of the process
    pub status: ExitStatus,
    /// Captured stderr lines
    pub stderr_lines: Vec<String>,
}

impl CommandOutput {
    /// Last lines of stderr, joined for error messages.
    pub fn diagnostics(&self) -> String {
        let skip = self.stderr_lines.len().saturating_sub(MAX_DIAGNOSTIC_LINES);
        self.stderr_lines[skip..].join("\n")
    }
}

/// Renders a command as `program arg1 arg2 ...` for logs and errors.
pub fn describe(command: &Command) -> String {
    let std_command = command.as_std();
    std::iter::once(std_command.get_program())
        .chain(std_command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a command to completion, echoing its output while capturing stderr.
pub async fn run_streaming(command: &mut Command) -> io::Result<CommandOutput> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Drain both pipes together so neither can fill up and stall the child.
    // Our stdout is reserved for the artifact report, so both echo to stderr
    let (_, stderr_lines) = tokio::join!(drain_lines(stdout), drain_lines(stderr));

    let status = child.wait().await?;

    Ok(CommandOutput {
        status,
        stderr_lines,
    })
}

/// Echoes a pipe line by line until EOF and returns the lines read.
///
/// Lines are decoded lossily and the pipe is read to EOF even when the
/// output is not UTF-8.
async fn drain_lines<R: AsyncRead + Unpin>(pipe: Option<R>) -> Vec<String> {
    let mut lines = Vec::new();
    let Some(pipe) = pipe else {
        return lines;
    };

    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                eprintln!("    {line}");
                lines.push(line);
            }
            Err(e) => {
                log::warn!("Stopped reading subprocess output: {}", e);
                break;
            }
        }
    }
    lines
}
