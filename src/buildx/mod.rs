//! Buildx builder setup and image build invocations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::runner::{args, CommandRunner};

#[cfg(test)]
mod tests;

#[derive(Debug, Deserialize)]
struct ClientInfo {
    #[serde(rename = "Version")]
    version: Option<String>,
}

/// Check that the docker binary exists and answers, before any build starts.
pub async fn ensure_docker(runner: &mut CommandRunner) -> Result<()> {
    if runner.is_dry_run() {
        return Ok(());
    }

    which::which(runner.program()).with_context(|| {
        format!(
            "{} not found in PATH; install docker with the buildx plugin",
            runner.program()
        )
    })?;

    let output = runner
        .run(&args(["version", "--format", "{{json .Client}}"]))
        .await
        .context("docker is installed but not responding")?;

    match serde_json::from_str::<ClientInfo>(output.stdout.trim()) {
        Ok(info) => {
            if let Some(version) = info.version {
                debug!("Docker client version: {}", version);
            }
        }
        Err(e) => debug!("Could not parse docker version output: {}", e),
    }

    Ok(())
}

/// Where the built image ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutput {
    /// Push to the registry (`--push`)
    Push,
    /// Load into the local docker daemon (`--load`)
    Load,
}

/// One `docker buildx build` invocation.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub platforms: Vec<String>,
    pub tag: String,
    pub dockerfile: Option<String>,
    pub context_dir: PathBuf,
    pub build_args: Vec<(String, String)>,
    pub no_cache: bool,
    pub extra_args: Vec<String>,
    pub output: BuildOutput,
}

impl BuildRequest {
    /// Arguments passed to the docker binary for this build.
    pub fn to_args(&self) -> Vec<String> {
        let mut v = args(["buildx", "build", "--platform"]);
        v.push(self.platforms.join(","));
        if self.no_cache {
            v.push("--no-cache".to_string());
        }
        v.push("-t".to_string());
        v.push(self.tag.clone());
        if let Some(dockerfile) = &self.dockerfile {
            v.push("-f".to_string());
            v.push(dockerfile.clone());
        }
        for (key, value) in &self.build_args {
            v.push("--build-arg".to_string());
            v.push(format!("{}={}", key, value));
        }
        v.extend(self.extra_args.iter().cloned());
        match self.output {
            BuildOutput::Push => v.push("--push".to_string()),
            BuildOutput::Load => v.push("--load".to_string()),
        }
        v.push(self.context_dir.display().to_string());
        v
    }
}

/// Drives buildx through a [`CommandRunner`].
pub struct BuildxDriver<'a> {
    runner: &'a mut CommandRunner,
    builder: String,
}

impl<'a> BuildxDriver<'a> {
    pub fn new(runner: &'a mut CommandRunner, builder: impl Into<String>) -> Self {
        Self {
            runner,
            builder: builder.into(),
        }
    }

    /// Make sure the named builder exists, is selected, and is bootstrapped.
    ///
    /// Inspect failure means the builder is missing, so create it; a failed
    /// create usually means it appeared in the meantime, so fall back to
    /// selecting it. Only the final bootstrap is fatal.
    pub async fn ensure_builder(&mut self) -> Result<()> {
        info!("Setting up buildx builder: {}", self.builder);

        let inspect = self
            .runner
            .run(&args(["buildx", "inspect", self.builder.as_str()]))
            .await;

        if inspect.is_err() {
            debug!("Builder {} not found, creating it", self.builder);
            let create = self
                .runner
                .run(&args([
                    "buildx",
                    "create",
                    "--name",
                    self.builder.as_str(),
                    "--use",
                ]))
                .await;

            if let Err(e) = create {
                warn!("Failed to create builder, trying to use an existing one: {}", e);
                self.runner
                    .run(&args(["buildx", "use", self.builder.as_str()]))
                    .await
                    .context("No usable buildx builder")?;
            }
        } else {
            self.runner
                .run(&args(["buildx", "use", self.builder.as_str()]))
                .await?;
        }

        self.runner
            .run(&args(["buildx", "inspect", "--bootstrap"]))
            .await
            .context("Failed to bootstrap buildx builder")?;

        Ok(())
    }

    /// Run a single image build.
    pub async fn build(&mut self, request: &BuildRequest) -> Result<()> {
        self.runner.run(&request.to_args()).await?;
        Ok(())
    }

    /// `docker buildx imagetools create -t <target> <sources..>` — retags an
    /// already-pushed multi-arch image under an alias.
    pub async fn imagetools_create(&mut self, target: &str, sources: &[String]) -> Result<()> {
        let mut v = args(["buildx", "imagetools", "create", "-t", target]);
        v.extend(sources.iter().cloned());
        self.runner.run(&v).await?;
        Ok(())
    }
}
