use super::*;

#[tokio::test]
async fn test_dry_run_records_without_executing() {
    let mut runner = CommandRunner::new("definitely-not-a-real-binary").with_dry_run(true);

    let output = runner
        .run(&args(["buildx", "inspect", "some-builder"]))
        .await
        .unwrap();

    assert!(output.stdout.is_empty());
    assert_eq!(
        runner.transcript(),
        ["definitely-not-a-real-binary buildx inspect some-builder"]
    );
}

#[tokio::test]
async fn test_run_captures_stdout() {
    let mut runner = CommandRunner::new("echo");
    let output = runner.run(&args(["hello", "world"])).await.unwrap();
    assert_eq!(output.stdout.trim(), "hello world");
}

#[tokio::test]
async fn test_nonzero_exit_carries_stderr() {
    let mut runner = CommandRunner::new("sh");
    let err = runner
        .run(&args(["-c", "echo boom >&2; exit 3"]))
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("Command failed"), "unexpected error: {}", msg);
    assert!(msg.contains("boom"), "stderr missing from error: {}", msg);
}

#[tokio::test]
async fn test_missing_binary_is_an_error() {
    let mut runner = CommandRunner::new("definitely-not-a-real-binary");
    let err = runner.run(&args(["--version"])).await.unwrap_err();
    assert!(err.to_string().contains("Failed to execute"));
}

#[test]
fn test_args_helper_mixes_sources() {
    let tag = String::from("v1");
    let v = args(["build", "-t", tag.as_str()]);
    assert_eq!(v, vec!["build", "-t", "v1"]);
}
