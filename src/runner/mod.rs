//! External command execution.
//!
//! Every docker invocation in the pipeline goes through [`CommandRunner`]:
//! it logs the command line, captures output, and turns a non-zero exit into
//! an error carrying the captured stderr. In dry-run mode commands are
//! recorded and echoed instead of executed, which is also what the tests
//! assert against.

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{debug, info};

#[cfg(test)]
mod tests;

/// Captured output of a completed command.
#[derive(Debug, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs an external program sequentially, one command at a time.
pub struct CommandRunner {
    program: String,
    dry_run: bool,
    transcript: Vec<String>,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            dry_run: false,
            transcript: Vec::new(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Every command line passed to [`run`](Self::run) so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Run the program with the given arguments and wait for it to finish.
    ///
    /// A non-zero exit status becomes an error whose message contains the
    /// command line and the trimmed stderr.
    pub async fn run(&mut self, args: &[String]) -> Result<CommandOutput> {
        let line = format!("{} {}", self.program, args.join(" "));
        self.transcript.push(line.clone());

        if self.dry_run {
            println!("[dry-run] {}", line);
            return Ok(CommandOutput::default());
        }

        info!("Running: {}", line);
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .with_context(|| format!("Failed to execute: {}", line))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!("Exit status: {}", output.status);

        if !output.status.success() {
            anyhow::bail!("Command failed ({}): {}", line, stderr.trim());
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

/// Build an argument vector from string literals and owned strings alike.
pub fn args<I, S>(parts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    parts.into_iter().map(Into::into).collect()
}
