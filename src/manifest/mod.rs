//! Manifest list assembly.
//!
//! A manifest list groups the architecture-specific tags under one logical
//! tag: create the list, annotate each member with its architecture and OS,
//! then push with `--purge` so a stale local copy never shadows the new one.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::runner::{args, CommandRunner};

#[cfg(test)]
mod tests;

/// One architecture-specific image entering a manifest list.
#[derive(Debug, Clone)]
pub struct ManifestMember {
    pub image: String,
    /// Architecture for `manifest annotate --arch`; alias manifests that
    /// point at a single already-annotated tag carry `None`.
    pub arch: Option<&'static str>,
}

/// A manifest list to assemble and push.
#[derive(Debug, Clone)]
pub struct ManifestSpec {
    pub target: String,
    pub members: Vec<ManifestMember>,
}

impl ManifestSpec {
    pub fn create_args(&self) -> Vec<String> {
        let mut v = args(["manifest", "create", self.target.as_str()]);
        v.extend(self.members.iter().map(|m| m.image.clone()));
        v
    }

    pub fn annotate_args(&self, member: &ManifestMember, arch: &str) -> Vec<String> {
        args([
            "manifest",
            "annotate",
            self.target.as_str(),
            member.image.as_str(),
            "--arch",
            arch,
            "--os",
            "linux",
        ])
    }

    pub fn push_args(&self) -> Vec<String> {
        args(["manifest", "push", "--purge", self.target.as_str()])
    }
}

/// Assembles manifest lists through a [`CommandRunner`].
pub struct ManifestAssembler<'a> {
    runner: &'a mut CommandRunner,
}

impl<'a> ManifestAssembler<'a> {
    pub fn new(runner: &'a mut CommandRunner) -> Self {
        Self { runner }
    }

    /// Create, annotate, and push one manifest list.
    ///
    /// A failed create aborts this manifest (there is nothing to annotate or
    /// push). Annotate failures are logged and the remaining members still
    /// get their annotations; the push happens either way.
    pub async fn assemble(&mut self, spec: &ManifestSpec) -> Result<()> {
        info!("Creating manifest {}", spec.target);

        self.runner
            .run(&spec.create_args())
            .await
            .with_context(|| format!("Failed to create manifest {}", spec.target))?;

        for member in &spec.members {
            if let Some(arch) = member.arch {
                if let Err(e) = self.runner.run(&spec.annotate_args(member, arch)).await {
                    warn!("Failed to annotate {} in {}: {}", member.image, spec.target, e);
                }
            }
        }

        self.runner
            .run(&spec.push_args())
            .await
            .with_context(|| format!("Failed to push manifest {}", spec.target))?;

        info!("Pushed manifest {}", spec.target);
        Ok(())
    }
}
