//! The one-shot release pipeline.
//!
//! A single multi-platform `buildx build --push` for the version tag,
//! followed by an `imagetools create` that aliases it as latest. The
//! registry keeps the per-architecture manifests; no local manifest
//! assembly is needed.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::{
    buildx::{ensure_docker, BuildOutput, BuildRequest, BuildxDriver},
    config::Config,
    constants::{release, tag},
    image::{ImageName, ARCHITECTURES},
    runner::CommandRunner,
};

pub struct ReleaseOptions {
    pub image: ImageName,
    pub version: String,
    pub context_dir: PathBuf,
}

pub struct ReleaseService;

impl ReleaseService {
    /// Build, push, and alias. Returns the latest tag that was created.
    pub async fn run(
        runner: &mut CommandRunner,
        config: &Config,
        opts: &ReleaseOptions,
    ) -> Result<String> {
        ensure_docker(runner).await?;

        let version_tag = opts.image.tagged(&opts.version);
        let latest_tag = opts.image.latest(false);

        info!("Building multi-arch release {}", version_tag);

        let mut driver = BuildxDriver::new(runner, &config.builder);
        driver.ensure_builder().await?;

        let request = BuildRequest {
            platforms: ARCHITECTURES
                .iter()
                .map(|a| a.platform.to_string())
                .collect(),
            tag: version_tag.clone(),
            dockerfile: None,
            context_dir: opts.context_dir.clone(),
            build_args: vec![(
                release::VERSION_BUILD_ARG.to_string(),
                opts.version.clone(),
            )],
            no_cache: config.build.no_cache,
            extra_args: config.build.extra_args.clone(),
            output: BuildOutput::Push,
        };
        driver.build(&request).await?;

        info!("Aliasing {} as {}", version_tag, tag::LATEST);
        driver
            .imagetools_create(&latest_tag, std::slice::from_ref(&version_tag))
            .await?;

        Ok(latest_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_release_dry_run_transcript() {
        let config = Config::default();
        let opts = ReleaseOptions {
            image: ImageName::new("alice", "server"),
            version: "1.4.22".to_string(),
            context_dir: PathBuf::from("."),
        };

        let mut runner = CommandRunner::new("docker").with_dry_run(true);
        let latest = ReleaseService::run(&mut runner, &config, &opts)
            .await
            .unwrap();
        assert_eq!(latest, "alice/server:latest");

        let transcript = runner.transcript();
        let build = transcript
            .iter()
            .find(|l| l.contains("buildx build"))
            .unwrap();
        assert!(build.contains("--platform linux/arm/v7,linux/arm64/v8,linux/amd64"));
        assert!(build.contains("--build-arg VERSION=1.4.22"));
        assert!(build.contains("--push"));
        assert!(build.contains("-t alice/server:1.4.22"));

        assert_eq!(
            transcript.last().unwrap(),
            "docker buildx imagetools create -t alice/server:latest alice/server:1.4.22"
        );
    }
}
