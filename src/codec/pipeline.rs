//! Two-process pipeline plumbing for the external compression methods
//!
//! The gzip-family methods run `tar` piped into a compressor process with
//! the compressor's stdout redirected into the target file. This module
//! models that as an explicit producer/consumer pair: both children are
//! spawned, both exit statuses are collected, and a failure in either stage
//! is reported as a failure of the whole pipeline rather than being lost in
//! shell-style piping.

use crate::common::{Result, SqueezeError};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// A producer process piped into a consumer process.
///
/// Stdout of the producer feeds stdin of the consumer; stdout of the
/// consumer is redirected into a file. Stderr of both stages is captured
/// for diagnostics.
#[derive(Debug)]
pub struct Pipeline {
    producer: Command,
    consumer: Command,
}

impl Pipeline {
    /// Build a pipeline from two prepared commands.
    pub fn new(producer: Command, consumer: Command) -> Self {
        Self { producer, consumer }
    }

    /// Run the pipeline, writing the consumer's stdout to `output`.
    ///
    /// Waits for both processes and fails if either exits non-zero.
    pub fn run_to_file(mut self, output: &Path) -> Result<()> {
        let producer_name = tool_name(&self.producer);
        let consumer_name = tool_name(&self.consumer);

        let mut producer = spawn(
            self.producer
                .stdout(Stdio::piped())
                .stderr(Stdio::piped()),
        )?;
        let Some(producer_out) = producer.stdout.take() else {
            let _ = producer.kill();
            let _ = producer.wait();
            return Err(SqueezeError::Io(std::io::Error::other(
                "producer stdout was not captured",
            )));
        };

        let consumer = File::create(output)
            .map_err(SqueezeError::from)
            .and_then(|file| {
                spawn(
                    self.consumer
                        .stdin(Stdio::from(producer_out))
                        .stdout(Stdio::from(file))
                        .stderr(Stdio::piped()),
                )
            });
        let mut consumer = match consumer {
            Ok(child) => child,
            Err(err) => {
                let _ = producer.kill();
                let _ = producer.wait();
                return Err(err);
            }
        };

        // Wait for both stages before judging either, so a failure on one
        // side cannot leave a zombie on the other.
        let producer_result = wait_checked(&mut producer, &producer_name);
        let consumer_result = wait_checked(&mut consumer, &consumer_name);
        producer_result?;
        consumer_result
    }
}

/// Run a single command, writing its stdout to `output`.
pub(crate) fn run_to_file(mut command: Command, output: &Path) -> Result<()> {
    let name = tool_name(&command);
    let file = File::create(output)?;
    let mut child = spawn(
        command
            .stdin(Stdio::null())
            .stdout(Stdio::from(file))
            .stderr(Stdio::piped()),
    )?;
    wait_checked(&mut child, &name)
}

/// Run a single command to completion, discarding its stdout.
pub(crate) fn run(mut command: Command) -> Result<()> {
    let name = tool_name(&command);
    let mut child = spawn(
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped()),
    )?;
    wait_checked(&mut child, &name)
}

fn tool_name(command: &Command) -> String {
    command.get_program().to_string_lossy().into_owned()
}

fn spawn(command: &mut Command) -> Result<Child> {
    let name = tool_name(command);
    command.spawn().map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            SqueezeError::ToolMissing(name)
        } else {
            SqueezeError::Io(err)
        }
    })
}

/// Wait for a child, drain its stderr, and map a non-zero exit into
/// [`SqueezeError::ToolFailed`] with the stderr logged for visibility.
fn wait_checked(child: &mut Child, tool: &str) -> Result<()> {
    let stderr = child.stderr.take().map(|mut pipe| {
        let mut buf = String::new();
        let _ = pipe.read_to_string(&mut buf);
        buf
    });
    let status = child.wait()?;
    if status.success() {
        return Ok(());
    }

    match stderr.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        Some(message) => log::warn!("{tool} failed with {status}: {message}"),
        None => log::warn!("{tool} failed with {status}"),
    }
    Err(SqueezeError::ToolFailed {
        tool: tool.to_string(),
        status,
    })
}
