use anyhow::{Context, Result};
use archbake::{
    buildx::{ensure_docker, BuildxDriver},
    cli::{Cli, Commands},
    config::Config,
    constants::registry,
    image::{find_arch, Arch, ImageName, ARCHITECTURES},
    manifest::ManifestAssembler,
    prompt,
    runner::CommandRunner,
    service::{
        build::{context_repository, manifest_plan},
        BuildOptions, BuildService, ReleaseOptions, ReleaseService,
    },
};
use clap::Parser;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build {
            tag,
            username,
            repository,
            push,
            no_push,
            predownloaded,
            no_predownloaded,
            context,
            archs,
            dry_run,
            yes,
        } => {
            let config = Config::load()?;
            let mut runner = CommandRunner::new(&config.docker).with_dry_run(dry_run);

            let predownloaded = if predownloaded {
                true
            } else if no_predownloaded {
                false
            } else if yes {
                true
            } else {
                prompt::confirm("Build predownloaded images?", true)?
            };

            let tag = match tag {
                Some(tag) => tag,
                None if yes => anyhow::bail!("--tag is required with --yes"),
                None => prompt::line("Enter tag name")?,
            };
            if tag.is_empty() {
                anyhow::bail!("Tag name is required");
            }

            let push = if push {
                true
            } else if no_push || yes {
                false
            } else {
                prompt::confirm("Push to the registry? (requires login)", false)?
            };

            let username = resolve_username(username, &config, push, yes)?;
            let repository = match repository.or_else(|| config.repository.clone()) {
                Some(repository) => repository,
                None => context_repository(&context)?,
            };

            let opts = BuildOptions {
                tag,
                image: ImageName::new(username, repository),
                push,
                predownloaded,
                context_dir: context,
                archs: resolve_archs(&archs)?,
            };

            let summary = BuildService::run(&mut runner, &config, &opts).await?;

            for tag in &summary.built {
                println!("built: {}", tag);
            }
            for manifest in &summary.manifests {
                println!("manifest: {}", manifest);
            }
            if !summary.failed.is_empty() {
                error!("{} build(s) failed: {}", summary.failed.len(), summary.failed.join(", "));
                std::process::exit(1);
            }
        }
        Commands::Release {
            username,
            version,
            repository,
            context,
            dry_run,
        } => {
            let config = Config::load()?;
            let mut runner = CommandRunner::new(&config.docker).with_dry_run(dry_run);

            let repository = match repository.or_else(|| config.repository.clone()) {
                Some(repository) => repository,
                None => context_repository(&context)?,
            };

            let opts = ReleaseOptions {
                image: ImageName::new(username, repository),
                version,
                context_dir: context,
            };

            let latest = ReleaseService::run(&mut runner, &config, &opts).await?;
            println!("{}", latest);
            info!(
                "Inspect with: {} buildx imagetools inspect {}",
                config.docker, latest
            );
        }
        Commands::Setup { dry_run } => {
            let config = Config::load()?;
            let mut runner = CommandRunner::new(&config.docker).with_dry_run(dry_run);

            ensure_docker(&mut runner).await?;
            let mut driver = BuildxDriver::new(&mut runner, &config.builder);
            driver.ensure_builder().await?;
            println!("builder ready: {}", config.builder);
        }
        Commands::Manifest {
            tag,
            username,
            repository,
            predownloaded,
            dry_run,
            yes,
        } => {
            let config = Config::load()?;
            let mut runner = CommandRunner::new(&config.docker).with_dry_run(dry_run);

            // Manifests always go to the registry, so a real username is
            // needed here even though `build` can fall back to a local one.
            let username = resolve_username(username, &config, true, yes)?;
            let repository = match repository.or_else(|| config.repository.clone()) {
                Some(repository) => repository,
                None => context_repository(Path::new("."))?,
            };

            ensure_docker(&mut runner).await?;

            let image = ImageName::new(username, repository);
            let archs: Vec<&'static Arch> = ARCHITECTURES.iter().collect();
            let specs = manifest_plan(&image, &tag, &archs, predownloaded);

            let mut assembler = ManifestAssembler::new(&mut runner);
            let mut pushed = Vec::new();
            for spec in &specs {
                match assembler.assemble(spec).await {
                    Ok(()) => pushed.push(spec.target.clone()),
                    Err(e) => error!("Skipping manifest {}: {}", spec.target, e),
                }
            }

            for manifest in &pushed {
                println!("manifest: {}", manifest);
            }
            if pushed.len() < specs.len() {
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("archbake {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn resolve_username(
    flag: Option<String>,
    config: &Config,
    push: bool,
    yes: bool,
) -> Result<String> {
    if let Some(username) = flag.or_else(|| config.default_username.clone()) {
        return Ok(username);
    }
    if push {
        if yes {
            anyhow::bail!(
                "A registry username is required when pushing; pass --username or set default_username in the config"
            );
        }
        let username = prompt::line_with_default("Registry username", registry::DEFAULT_USERNAME)?;
        return Ok(username);
    }
    Ok(registry::DEFAULT_USERNAME.to_string())
}

fn resolve_archs(names: &[String]) -> Result<Vec<&'static Arch>> {
    if names.is_empty() {
        return Ok(ARCHITECTURES.iter().collect());
    }
    names
        .iter()
        .map(|name| find_arch(name))
        .collect::<Result<Vec<_>>>()
        .context("Invalid --arch value")
}
