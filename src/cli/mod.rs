use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::release;

#[derive(Parser)]
#[command(name = "archbake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build per-architecture images and assemble manifest lists
    Build {
        /// Tag name applied to the architecture-specific images
        #[arg(long)]
        tag: Option<String>,

        /// Registry username for image references and pushes
        #[arg(short = 'u', long, env = "ARCHBAKE_USERNAME")]
        username: Option<String>,

        /// Repository name (defaults to the build context directory name)
        #[arg(long, env = "ARCHBAKE_REPOSITORY")]
        repository: Option<String>,

        /// Push images and manifests to the registry
        #[arg(long, conflicts_with = "no_push")]
        push: bool,

        /// Load images into the local daemon instead of pushing
        #[arg(long)]
        no_push: bool,

        /// Also build the predownloaded variant of each image
        #[arg(long, conflicts_with = "no_predownloaded")]
        predownloaded: bool,

        /// Skip the predownloaded variants
        #[arg(long)]
        no_predownloaded: bool,

        /// Build context directory
        #[arg(long, default_value = ".")]
        context: PathBuf,

        /// Architectures to build, comma separated (default: all)
        #[arg(long = "arch", value_delimiter = ',')]
        archs: Vec<String>,

        /// Print the docker commands without running them
        #[arg(long)]
        dry_run: bool,

        /// Never prompt; answer every question with its default
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// One-shot multi-platform build, push, and latest alias
    Release {
        /// Registry username
        #[arg(short = 'u', long, env = "ARCHBAKE_USERNAME")]
        username: String,

        /// Version to build and tag
        #[arg(short = 'V', long, default_value = release::DEFAULT_VERSION)]
        version: String,

        /// Repository name (defaults to the build context directory name)
        #[arg(long, env = "ARCHBAKE_REPOSITORY")]
        repository: Option<String>,

        /// Build context directory
        #[arg(long, default_value = ".")]
        context: PathBuf,

        /// Print the docker commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Create and bootstrap the buildx builder
    Setup {
        /// Print the docker commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Assemble manifest lists for images that were already pushed
    Manifest {
        /// Tag name of the pushed architecture-specific images
        #[arg(long)]
        tag: String,

        /// Registry username
        #[arg(short = 'u', long, env = "ARCHBAKE_USERNAME")]
        username: Option<String>,

        /// Repository name (defaults to the current directory name)
        #[arg(long, env = "ARCHBAKE_REPOSITORY")]
        repository: Option<String>,

        /// Include the predownloaded manifest variants
        #[arg(long)]
        predownloaded: bool,

        /// Print the docker commands without running them
        #[arg(long)]
        dry_run: bool,

        /// Never prompt; missing values are errors
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show version information
    Version,
}
