//! The per-architecture build pipeline.
//!
//! Sets up the builder, builds one image per target architecture (and
//! optionally the predownloaded variant of each), and when pushing,
//! assembles the manifest lists that group them under the latest tags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::{
    buildx::{ensure_docker, BuildOutput, BuildRequest, BuildxDriver},
    config::Config,
    image::{dockerfile_for, Arch, ImageName},
    manifest::{ManifestAssembler, ManifestMember, ManifestSpec},
    runner::CommandRunner,
};

/// Resolved options for one build run.
pub struct BuildOptions {
    pub tag: String,
    pub image: ImageName,
    pub push: bool,
    pub predownloaded: bool,
    pub context_dir: PathBuf,
    pub archs: Vec<&'static Arch>,
}

/// What happened during a run. A non-empty `failed` list makes the process
/// exit non-zero, even though the run itself carries on past each failure.
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub built: Vec<String>,
    pub failed: Vec<String>,
    pub manifests: Vec<String>,
}

pub struct BuildService;

impl BuildService {
    pub async fn run(
        runner: &mut CommandRunner,
        config: &Config,
        opts: &BuildOptions,
    ) -> Result<BuildSummary> {
        ensure_docker(runner).await?;

        let mut summary = BuildSummary::default();

        {
            let mut driver = BuildxDriver::new(runner, &config.builder);
            driver.ensure_builder().await?;

            // Regular images first, then the predownloaded variants, the
            // same image either way apart from the Dockerfile and tag.
            for predownloaded in [false, true] {
                if predownloaded && !opts.predownloaded {
                    continue;
                }
                for arch in &opts.archs {
                    let tag = opts.image.arch_tag(arch, &opts.tag, predownloaded);
                    info!("Building {} for platform {}", tag, arch.platform);

                    let request = BuildRequest {
                        platforms: vec![arch.platform.to_string()],
                        tag: tag.clone(),
                        dockerfile: Some(dockerfile_for(arch, predownloaded)),
                        context_dir: opts.context_dir.clone(),
                        build_args: Vec::new(),
                        no_cache: config.build.no_cache,
                        extra_args: config.build.extra_args.clone(),
                        output: if opts.push {
                            BuildOutput::Push
                        } else {
                            BuildOutput::Load
                        },
                    };

                    match driver.build(&request).await {
                        Ok(()) => {
                            info!("Successfully built {}", tag);
                            summary.built.push(tag);
                        }
                        Err(e) => {
                            error!("Failed to build {}: {}", tag, e);
                            summary.failed.push(tag);
                        }
                    }
                }
            }
        }

        if opts.push {
            let specs =
                manifest_plan(&opts.image, &opts.tag, &opts.archs, opts.predownloaded);
            Self::assemble_manifests(runner, &specs, &mut summary).await;
        } else {
            info!("Skipping manifest creation (images were not pushed)");
            info!(
                "Local images are tagged under {}; push them to assemble manifests later",
                opts.image.repository()
            );
        }

        Ok(summary)
    }

    async fn assemble_manifests(
        runner: &mut CommandRunner,
        specs: &[ManifestSpec],
        summary: &mut BuildSummary,
    ) {
        let mut assembler = ManifestAssembler::new(runner);
        for spec in specs {
            match assembler.assemble(spec).await {
                Ok(()) => summary.manifests.push(spec.target.clone()),
                Err(e) => error!("Skipping manifest {}: {}", spec.target, e),
            }
        }
    }
}

/// The manifest lists one pushed run produces: the unified latest tag
/// annotated per architecture, its predownloaded counterpart when that
/// variant was built, and a single-member latest alias per architecture.
pub fn manifest_plan(
    image: &ImageName,
    tag: &str,
    archs: &[&'static Arch],
    predownloaded: bool,
) -> Vec<ManifestSpec> {
    let variants: &[bool] = if predownloaded {
        &[false, true]
    } else {
        &[false]
    };

    let mut specs = Vec::new();

    for &variant in variants {
        specs.push(ManifestSpec {
            target: image.latest(variant),
            members: archs
                .iter()
                .map(|arch| ManifestMember {
                    image: image.arch_tag(arch, tag, variant),
                    arch: Some(arch.manifest_arch),
                })
                .collect(),
        });
    }

    for arch in archs {
        for &variant in variants {
            specs.push(ManifestSpec {
                target: image.arch_latest(arch, variant),
                members: vec![ManifestMember {
                    image: image.arch_tag(arch, tag, variant),
                    arch: None,
                }],
            });
        }
    }

    specs
}

/// Derive the repository name from the build context directory, the way a
/// project is usually named after its directory.
pub fn context_repository(context_dir: &Path) -> Result<String> {
    let canonical = context_dir.canonicalize().with_context(|| {
        format!("Build context {} does not exist", context_dir.display())
    })?;

    canonical
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .context("Could not derive a repository name from the build context directory")
}
