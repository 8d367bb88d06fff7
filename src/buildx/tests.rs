use std::path::PathBuf;

use super::*;
use crate::runner::CommandRunner;

fn request() -> BuildRequest {
    BuildRequest {
        platforms: vec!["linux/arm64/v8".to_string()],
        tag: "alice/server:arm64v8-v1".to_string(),
        dockerfile: Some("Dockerfile.arm64v8".to_string()),
        context_dir: PathBuf::from("."),
        build_args: Vec::new(),
        no_cache: true,
        extra_args: Vec::new(),
        output: BuildOutput::Load,
    }
}

#[test]
fn test_build_args_load() {
    let v = request().to_args();
    assert_eq!(
        v,
        vec![
            "buildx",
            "build",
            "--platform",
            "linux/arm64/v8",
            "--no-cache",
            "-t",
            "alice/server:arm64v8-v1",
            "-f",
            "Dockerfile.arm64v8",
            "--load",
            ".",
        ]
    );
}

#[test]
fn test_build_args_push_with_build_arg() {
    let mut req = request();
    req.output = BuildOutput::Push;
    req.dockerfile = None;
    req.platforms = vec![
        "linux/amd64".to_string(),
        "linux/arm64".to_string(),
        "linux/arm/v7".to_string(),
    ];
    req.build_args = vec![("VERSION".to_string(), "1.4.22".to_string())];

    let v = req.to_args();
    assert_eq!(
        v,
        vec![
            "buildx",
            "build",
            "--platform",
            "linux/amd64,linux/arm64,linux/arm/v7",
            "--no-cache",
            "-t",
            "alice/server:arm64v8-v1",
            "--build-arg",
            "VERSION=1.4.22",
            "--push",
            ".",
        ]
    );
}

#[test]
fn test_build_args_extra_args_before_output_flag() {
    let mut req = request();
    req.no_cache = false;
    req.extra_args = vec!["--pull".to_string()];

    let v = req.to_args();
    assert!(!v.contains(&"--no-cache".to_string()));
    let pull = v.iter().position(|a| a == "--pull").unwrap();
    let load = v.iter().position(|a| a == "--load").unwrap();
    assert!(pull < load);
}

#[tokio::test]
async fn test_ensure_builder_dry_run_sequence() {
    let mut runner = CommandRunner::new("docker").with_dry_run(true);
    {
        let mut driver = BuildxDriver::new(&mut runner, "archbake-builder");
        driver.ensure_builder().await.unwrap();
    }

    // Dry-run commands all "succeed", so the happy path is inspect, use,
    // bootstrap with no create.
    assert_eq!(
        runner.transcript(),
        [
            "docker buildx inspect archbake-builder",
            "docker buildx use archbake-builder",
            "docker buildx inspect --bootstrap",
        ]
    );
}

#[tokio::test]
async fn test_imagetools_create_args() {
    let mut runner = CommandRunner::new("docker").with_dry_run(true);
    {
        let mut driver = BuildxDriver::new(&mut runner, "archbake-builder");
        driver
            .imagetools_create(
                "alice/server:latest",
                &["alice/server:1.4.22".to_string()],
            )
            .await
            .unwrap();
    }

    assert_eq!(
        runner.transcript(),
        ["docker buildx imagetools create -t alice/server:latest alice/server:1.4.22"]
    );
}
