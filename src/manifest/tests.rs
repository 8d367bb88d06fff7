use super::*;
use crate::runner::CommandRunner;

fn unified_spec() -> ManifestSpec {
    ManifestSpec {
        target: "alice/server:latest".to_string(),
        members: vec![
            ManifestMember {
                image: "alice/server:arm32v7-v1".to_string(),
                arch: Some("arm"),
            },
            ManifestMember {
                image: "alice/server:arm64v8-v1".to_string(),
                arch: Some("arm64"),
            },
            ManifestMember {
                image: "alice/server:x86_64-v1".to_string(),
                arch: Some("amd64"),
            },
        ],
    }
}

#[test]
fn test_create_args_list_all_members() {
    let spec = unified_spec();
    assert_eq!(
        spec.create_args(),
        vec![
            "manifest",
            "create",
            "alice/server:latest",
            "alice/server:arm32v7-v1",
            "alice/server:arm64v8-v1",
            "alice/server:x86_64-v1",
        ]
    );
}

#[test]
fn test_annotate_args() {
    let spec = unified_spec();
    let member = &spec.members[2];
    assert_eq!(
        spec.annotate_args(member, "amd64"),
        vec![
            "manifest",
            "annotate",
            "alice/server:latest",
            "alice/server:x86_64-v1",
            "--arch",
            "amd64",
            "--os",
            "linux",
        ]
    );
}

#[test]
fn test_push_args_purge() {
    let spec = unified_spec();
    assert_eq!(
        spec.push_args(),
        vec!["manifest", "push", "--purge", "alice/server:latest"]
    );
}

#[tokio::test]
async fn test_assemble_sequence() {
    let mut runner = CommandRunner::new("docker").with_dry_run(true);
    {
        let mut assembler = ManifestAssembler::new(&mut runner);
        assembler.assemble(&unified_spec()).await.unwrap();
    }

    let transcript = runner.transcript();
    assert_eq!(transcript.len(), 5);
    assert!(transcript[0].starts_with("docker manifest create alice/server:latest"));
    assert!(transcript[1].contains("annotate"));
    assert!(transcript[1].contains("--arch arm"));
    assert!(transcript[3].contains("--arch amd64"));
    assert_eq!(
        transcript[4],
        "docker manifest push --purge alice/server:latest"
    );
}

#[tokio::test]
async fn test_alias_manifest_skips_annotate() {
    let spec = ManifestSpec {
        target: "alice/server:x86_64-latest".to_string(),
        members: vec![ManifestMember {
            image: "alice/server:x86_64-v1".to_string(),
            arch: None,
        }],
    };

    let mut runner = CommandRunner::new("docker").with_dry_run(true);
    {
        let mut assembler = ManifestAssembler::new(&mut runner);
        assembler.assemble(&spec).await.unwrap();
    }

    let transcript = runner.transcript();
    assert_eq!(transcript.len(), 2);
    assert!(transcript.iter().all(|line| !line.contains("annotate")));
}
