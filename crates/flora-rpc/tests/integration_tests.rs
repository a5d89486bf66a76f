//! Integration tests for the flora-rpc JSON-RPC server.
//!
//! Each test spawns the binary against a temporary data directory and talks
//! to it over HTTP the way the dashboard does.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::AsyncBufReadExt;

const SONNET_CHAT: &str = "\
CLADE,ORDER,FAMILY,GENUS,SPECIES,GROWTH HABIT,CONSERVATION STATUS,GENERAL LOCATION,HEMISPHERE
Eudicots,Rosales,Rosaceae,Rosa,Rosa canina,Both,Rare,Europe,Northern
Eudicots,Rosales,Rosaceae,Rosa,Rosa rugosa,Cultivated,Widespread/Common,East Asia,Northern
Eudicots,Fabales,Fabaceae,Rosa,Rosa misplaced,Wild,Rare,Europe,Northern
Monocots,Poales,Poaceae,Stipa,Stipa gigantea,Wild,Uncommon,Europe,N/A
";

const CLAUDE_CODE: &str = "\
SPECIES,HEMISPHERE
Rosa canina,Northern
Protea cynaroides,Southern
";

/// Create a data directory holding two catalog tables.
fn create_test_env() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(
        temp_dir.path().join("enhanced_species_table_SonnetChat.csv"),
        SONNET_CHAT,
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join("enhanced_species_table_ClaudeCode.csv"),
        CLAUDE_CODE,
    )
    .unwrap();
    temp_dir
}

/// Make an RPC call and return the result, or the error object as text.
async fn rpc_call(port: u16, method: &str, params: Value) -> Result<Value, String> {
    let json = rpc_call_raw(port, method, params).await?;
    if let Some(error) = json.get("error") {
        return Err(error.to_string());
    }
    Ok(json.get("result").cloned().unwrap_or(Value::Null))
}

/// Make an RPC call and return the full JSON-RPC payload.
async fn rpc_call_raw(port: u16, method: &str, params: Value) -> Result<Value, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://127.0.0.1:{}/rpc", port))
        .json(&json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        }))
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    response.json::<Value>().await.map_err(|e| e.to_string())
}

async fn check_health(port: u16) -> bool {
    let client = reqwest::Client::new();
    if let Ok(response) = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
    {
        if let Ok(json) = response.json::<Value>().await {
            return json.get("status").and_then(|v| v.as_str()) == Some("ok");
        }
    }
    false
}

async fn wait_for_server(port: u16, timeout_secs: u64) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < Duration::from_secs(timeout_secs) {
        if check_health(port).await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    false
}

struct RpcServerHandle {
    child: tokio::process::Child,
    port: u16,
    stdout_drain: Option<tokio::task::JoinHandle<()>>,
}

impl RpcServerHandle {
    async fn stop(mut self) {
        if let Some(drain) = self.stdout_drain.take() {
            drain.abort();
        }
        let _ = self.child.kill().await;
        let _ = self.child.wait().await;
    }
}

impl Drop for RpcServerHandle {
    fn drop(&mut self) {
        if let Some(drain) = self.stdout_drain.take() {
            drain.abort();
        }
        let _ = self.child.start_kill();
    }
}

fn rpc_binary() -> Result<PathBuf, String> {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_flora-rpc") {
        return Ok(PathBuf::from(path));
    }
    let current_exe = std::env::current_exe()
        .map_err(|e| format!("failed to resolve current_exe for fallback: {e}"))?;
    let target_debug_dir = current_exe
        .parent()
        .and_then(|p| p.parent())
        .ok_or_else(|| "failed to resolve target/debug directory for fallback".to_string())?;

    let mut fallback = target_debug_dir.join("flora-rpc");
    if cfg!(target_os = "windows") {
        fallback.set_extension("exe");
    }
    if !fallback.exists() {
        return Err(format!(
            "CARGO_BIN_EXE_flora-rpc not set and fallback binary not found at {}",
            fallback.display()
        ));
    }
    Ok(fallback)
}

/// Start the RPC binary and wait until `/health` is ready.
async fn start_rpc_server(data_dir: &Path, extra_args: &[&str]) -> Result<RpcServerHandle, String> {
    let mut child = tokio::process::Command::new(rpc_binary()?)
        .arg("--host")
        .arg("127.0.0.1")
        .arg("--port")
        .arg("0")
        .arg("--data-dir")
        .arg(data_dir)
        .args(extra_args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("failed to spawn flora-rpc: {e}"))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| "failed to capture stdout".to_string())?;
    let mut lines = tokio::io::BufReader::new(stdout).lines();

    let mut discovered_port: Option<u16> = None;
    let deadline = tokio::time::Instant::now() + Duration::from_secs(20);
    while tokio::time::Instant::now() < deadline {
        match tokio::time::timeout(Duration::from_millis(250), lines.next_line()).await {
            Ok(Ok(Some(line))) => {
                if let Some(value) = line.strip_prefix("RPC_PORT=") {
                    let parsed = value
                        .trim()
                        .parse::<u16>()
                        .map_err(|e| format!("invalid RPC_PORT value '{value}': {e}"))?;
                    discovered_port = Some(parsed);
                    break;
                }
            }
            Ok(Ok(None)) => break,
            Ok(Err(err)) => return Err(format!("failed to read flora-rpc stdout: {err}")),
            Err(_) => continue,
        }
    }

    let port =
        discovered_port.ok_or_else(|| "RPC_PORT line not emitted by flora-rpc".to_string())?;
    if !wait_for_server(port, 15).await {
        return Err(format!("flora-rpc failed health check on port {port}"));
    }

    let stdout_drain =
        tokio::spawn(async move { while let Ok(Some(_)) = lines.next_line().await {} });

    Ok(RpcServerHandle {
        child,
        port,
        stdout_drain: Some(stdout_drain),
    })
}

fn error_code(payload: &Value) -> Option<i64> {
    payload.get("error")?.get("code")?.as_i64()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_health_and_default_source() {
    let temp_dir = create_test_env();
    let server = start_rpc_server(temp_dir.path(), &[]).await.unwrap();

    let health = rpc_call(server.port, "health_check", json!({})).await.unwrap();
    assert_eq!(health["status"], "ok");

    let sources = rpc_call(server.port, "list_data_sources", json!({})).await.unwrap();
    assert_eq!(sources["sources"].as_array().map(Vec::len), Some(4));
    assert_eq!(sources["defaultSourceId"], "sonnet-chat");
    assert_eq!(sources["activeSourceId"], "sonnet-chat");

    let info = rpc_call(server.port, "get_dataset_info", json!({})).await.unwrap();
    assert_eq!(info["recordCount"], 4);

    server.stop().await;
}

#[tokio::test]
async fn test_summary_and_validation() {
    let temp_dir = create_test_env();
    let server = start_rpc_server(temp_dir.path(), &[]).await.unwrap();

    let summary = rpc_call(server.port, "get_summary_statistics", json!({}))
        .await
        .unwrap();
    assert_eq!(summary["totalSpecies"], 4);
    assert_eq!(summary["conservationConcern"], 2);
    assert_eq!(summary["humanInfluence"], 50);
    assert_eq!(summary["taxonomyTree"][0]["name"], "Eudicots");
    assert_eq!(summary["taxonomyTree"][0]["value"], 3);

    let report = rpc_call(server.port, "validate_taxonomy", json!({})).await.unwrap();
    assert_eq!(report["isValid"], false);
    let violations = report["hierarchyViolations"].as_array().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["type"], "Genus → Family");
    assert_eq!(violations[0]["item"], "Rosa");
    assert_eq!(violations[0]["level"], "genus");
    assert_eq!(summary["taxonomyValidation"], report);

    let charts = rpc_call(server.port, "get_chart_series", json!({})).await.unwrap();
    assert_eq!(charts["generalLocation"][0]["name"], "Europe");

    server.stop().await;
}

#[tokio::test]
async fn test_table_query_and_export() {
    let temp_dir = create_test_env();
    let server = start_rpc_server(temp_dir.path(), &[]).await.unwrap();

    let page = rpc_call(
        server.port,
        "query_table",
        json!({
            "filters": {"GENUS": "ros", "GENERAL LOCATION": ["europe"]},
            "sortKey": "SPECIES",
            "sortDirection": "desc",
            "limit": 1
        }),
    )
    .await
    .unwrap();
    assert_eq!(page["filteredCount"], 2);
    assert_eq!(page["rows"].as_array().map(Vec::len), Some(1));
    assert_eq!(page["rows"][0]["SPECIES"], "Rosa misplaced");

    let values = rpc_call(server.port, "get_unique_values", json!({"column": "HEMISPHERE"}))
        .await
        .unwrap();
    assert_eq!(values["values"], json!(["N/A", "Northern"]));

    let export = rpc_call(
        server.port,
        "export_csv",
        json!({"filters": {"GENUS": "stipa"}}),
    )
    .await
    .unwrap();
    let content = export["content"].as_str().unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("Stipa gigantea"));

    server.stop().await;
}

#[tokio::test]
async fn test_upload_and_errors() {
    let temp_dir = create_test_env();
    let server = start_rpc_server(temp_dir.path(), &["--source", "claude-code"]).await.unwrap();

    let info = rpc_call(server.port, "get_dataset_info", json!({})).await.unwrap();
    assert_eq!(info["sourceId"], "claude-code");

    let uploaded = rpc_call(
        server.port,
        "upload_csv",
        json!({"name": "mine.csv", "content": "GENUS\nAcer\nQuercus\nTilia\n"}),
    )
    .await
    .unwrap();
    assert_eq!(uploaded["sourceId"], "upload");
    assert_eq!(uploaded["recordCount"], 3);

    let blank = rpc_call_raw(server.port, "upload_csv", json!({"content": "  "}))
        .await
        .unwrap();
    assert_eq!(error_code(&blank), Some(-32602));

    let unknown = rpc_call_raw(server.port, "select_data_source", json!({"sourceId": "gemini"}))
        .await
        .unwrap();
    assert_eq!(error_code(&unknown), Some(-32001));

    let missing = rpc_call_raw(
        server.port,
        "select_data_source",
        json!({"source_id": "og-sonnet"}),
    )
    .await
    .unwrap();
    assert_eq!(error_code(&missing), Some(-32003));
    assert_eq!(missing["error"]["data"]["retryable"], true);

    // Failed loads leave the upload active.
    let info = rpc_call(server.port, "get_dataset_info", json!({})).await.unwrap();
    assert_eq!(info["sourceId"], "upload");

    server.stop().await;
}

#[tokio::test]
async fn test_no_dataset_when_default_missing() {
    let temp_dir = TempDir::new().unwrap();
    let server = start_rpc_server(temp_dir.path(), &[]).await.unwrap();

    let payload = rpc_call_raw(server.port, "get_summary_statistics", json!({}))
        .await
        .unwrap();
    assert_eq!(error_code(&payload), Some(-32002));

    server.stop().await;
}

#[tokio::test]
async fn test_compare_data_sources() {
    let temp_dir = create_test_env();
    let server = start_rpc_server(temp_dir.path(), &[]).await.unwrap();

    let result = rpc_call(
        server.port,
        "compare_data_sources",
        json!({"sourceIds": ["claude-code", "sonnet-chat"], "columns": ["HEMISPHERE"]}),
    )
    .await
    .unwrap();
    let hemisphere = &result["columns"][0];
    assert_eq!(hemisphere["column"], "HEMISPHERE");
    assert_eq!(hemisphere["rows"].as_array().map(Vec::len), Some(2));
    assert_eq!(hemisphere["uniqueValues"], json!(["Northern", "Southern"]));
    assert_eq!(hemisphere["stackKeys"], json!(["Empty/NA", "Northern", "Southern"]));
    assert_eq!(hemisphere["rows"][1]["name"], "Sonnet Chat");
    assert_eq!(hemisphere["rows"][1]["Empty/NA"], 1);

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_method() {
    let temp_dir = create_test_env();
    let server = start_rpc_server(temp_dir.path(), &[]).await.unwrap();

    let payload = rpc_call_raw(server.port, "make_coffee", json!({})).await.unwrap();
    assert_eq!(error_code(&payload), Some(-32603));

    server.stop().await;
}
