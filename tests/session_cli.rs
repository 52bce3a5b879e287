use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

#[test]
fn json_session_writes_only_json_to_stdout() {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scan_results.csv");

    let mut child = Command::new(env!("CARGO_BIN_EXE_scantrend"))
        .args(["--format", "json", "session"])
        .arg(&fixture)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"refresh\nquit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let documents: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&stdout)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(documents.len(), 2);
    for document in &documents {
        assert_eq!(document["series"], serde_json::json!(["com", "net", "xyz"]));
    }
    assert!(String::from_utf8_lossy(&output.stderr).contains("> "));
}
