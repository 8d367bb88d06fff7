//! Target architectures and image tag derivation.

use anyhow::Result;

use crate::constants::tag;


/// A target architecture the pipeline builds for.
///
/// `name` is the tag prefix and Dockerfile suffix, `platform` is what buildx
/// gets via `--platform`, and `manifest_arch` is the value `docker manifest
/// annotate --arch` expects. Building and manifest annotation both read this
/// table, so the keys can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arch {
    pub name: &'static str,
    pub platform: &'static str,
    pub manifest_arch: &'static str,
}

/// The fixed set of architectures built by the per-arch pipeline.
pub const ARCHITECTURES: [Arch; 3] = [
    Arch {
        name: "arm32v7",
        platform: "linux/arm/v7",
        manifest_arch: "arm",
    },
    Arch {
        name: "arm64v8",
        platform: "linux/arm64/v8",
        manifest_arch: "arm64",
    },
    Arch {
        name: "x86_64",
        platform: "linux/amd64",
        manifest_arch: "amd64",
    },
];

/// Look up an architecture by its tag-prefix name.
pub fn find_arch(name: &str) -> Result<&'static Arch> {
    ARCHITECTURES
        .iter()
        .find(|a| a.name == name)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown architecture: {} (expected one of: {})",
                name,
                ARCHITECTURES
                    .iter()
                    .map(|a| a.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
}

/// A `username/repository` pair with tag derivation helpers.
///
/// All image references the pipeline produces come from here; nothing else
/// does string interpolation on image names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    username: String,
    repository: String,
}

impl ImageName {
    pub fn new(username: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            repository: repository.into(),
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// `user/repo:tag`
    pub fn tagged(&self, tag: &str) -> String {
        format!("{}/{}:{}", self.username, self.repository, tag)
    }

    /// `user/repo:{arch}-{tag}` or `user/repo:{arch}-predownloaded-{tag}`
    pub fn arch_tag(&self, arch: &Arch, tag_name: &str, predownloaded: bool) -> String {
        if predownloaded {
            self.tagged(&format!(
                "{}-{}-{}",
                arch.name,
                tag::PREDOWNLOADED,
                tag_name
            ))
        } else {
            self.tagged(&format!("{}-{}", arch.name, tag_name))
        }
    }

    /// `user/repo:latest` or `user/repo:latest-predownloaded`
    pub fn latest(&self, predownloaded: bool) -> String {
        if predownloaded {
            self.tagged(&format!("{}-{}", tag::LATEST, tag::PREDOWNLOADED))
        } else {
            self.tagged(tag::LATEST)
        }
    }

    /// `user/repo:{arch}-latest` or `user/repo:{arch}-latest-predownloaded`
    pub fn arch_latest(&self, arch: &Arch, predownloaded: bool) -> String {
        if predownloaded {
            self.tagged(&format!(
                "{}-{}-{}",
                arch.name,
                tag::LATEST,
                tag::PREDOWNLOADED
            ))
        } else {
            self.tagged(&format!("{}-{}", arch.name, tag::LATEST))
        }
    }
}

/// Dockerfile name for an architecture: `Dockerfile.{arch}` with an optional
/// `-predownloaded` suffix.
pub fn dockerfile_for(arch: &Arch, predownloaded: bool) -> String {
    if predownloaded {
        format!("Dockerfile.{}-{}", arch.name, tag::PREDOWNLOADED)
    } else {
        format!("Dockerfile.{}", arch.name)
    }
}
