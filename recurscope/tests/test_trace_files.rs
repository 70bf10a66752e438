use std::process::Command;

use recurscope::catalog::Fibonacci;
use recurscope::domain::Value;
use recurscope::export::ChromeTraceExporter;
use recurscope::interceptor::trace;
use recurscope::trace_data::Trace;

const FIB3_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fib3_trace.json");

#[test]
fn test_fixture_matches_live_trace() {
    let saved = Trace::from_file(FIB3_FIXTURE).expect("Failed to load fixture");
    let live = trace(&Fibonacci, vec![Value::Int(3)]).unwrap();
    assert_eq!(saved, live);
}

#[test]
fn test_export_then_load() {
    let original = trace(&Fibonacci, vec![Value::Int(4)]).unwrap();

    let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    original.to_writer(file.as_file()).expect("Failed to export trace");
    let loaded = Trace::from_file(file.path()).expect("Failed to reload trace");

    assert_eq!(loaded, original);
}

#[test]
fn test_load_rejects_garbage() {
    let err = Trace::from_reader("{\"events\": 3}".as_bytes()).unwrap_err();
    assert!(!err.to_string().is_empty());
    assert!(Trace::from_file("/nonexistent/trace.json").is_err());
}

#[test]
fn test_chrome_export_creates_valid_json() {
    let trace = trace(&Fibonacci, vec![Value::Int(3)]).unwrap();
    let exporter = ChromeTraceExporter::from_trace(&trace);
    let mut buffer = Vec::new();
    exporter.export(&mut buffer).expect("Failed to export trace");

    let json_str = String::from_utf8(buffer).expect("Invalid UTF-8");
    let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("Invalid JSON");

    assert_eq!(parsed["displayTimeUnit"], "ms");
    let events = parsed["traceEvents"].as_array().expect("traceEvents is an array");
    assert_eq!(events.len(), 10);
    assert_eq!(events.iter().filter(|e| e["ph"] == "B").count(), 5);
    assert_eq!(events.iter().filter(|e| e["ph"] == "E").count(), 5);
    assert_eq!(events[0]["name"], "fibonacci");
    assert_eq!(events[0]["args"]["arguments"], "3");
}

#[test]
fn test_cli_tree() {
    let output = Command::new(env!("CARGO_BIN_EXE_recurscope"))
        .args(["tree", "fibonacci", "3"])
        .output()
        .expect("Failed to run recurscope");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "fibonacci(3) = 2\n\
         ├── fibonacci(2) = 1\n\
         │   ├── fibonacci(1) = 1\n\
         │   └── fibonacci(0) = 0\n\
         └── fibonacci(1) = 1\n"
    );
}

#[test]
fn test_cli_unknown_function_is_a_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_recurscope"))
        .args(["trace", "fibonaci", "3"])
        .output()
        .expect("Failed to run recurscope");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not a function"));
}

#[test]
fn test_cli_trace_export_replays() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fib3.json");
    let output = Command::new(env!("CARGO_BIN_EXE_recurscope"))
        .args(["--quiet", "trace", "fibonacci", "3", "--export"])
        .arg(&path)
        .output()
        .expect("Failed to run recurscope");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 10);

    let saved = Trace::from_file(&path).unwrap();
    assert_eq!(saved, Trace::from_file(FIB3_FIXTURE).unwrap());
}
