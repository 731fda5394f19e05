use serde_json::Value;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir =
        std::env::temp_dir().join(format!("chatline-{prefix}-{}-{nanos}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

fn run_chatline(args: &[&str], home: &Path, stdin: &str) -> (bool, String, String) {
    let bin = std::env::var("CARGO_BIN_EXE_chatline").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("chatline.exe");
        } else {
            path.push("chatline");
        }
        path.to_string_lossy().into_owned()
    });
    let mut child = Command::new(bin)
        .args(args)
        .env("CHATLINE_HOME", home)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("run chatline");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait chatline");
    (
        output.status.success(),
        String::from_utf8(output.stdout).expect("stdout utf8"),
        String::from_utf8(output.stderr).expect("stderr utf8"),
    )
}

fn stored_name(home: &Path) -> Option<String> {
    let raw = fs::read_to_string(home.join("store.json")).ok()?;
    let store: Value = serde_json::from_str(&raw).expect("store json");
    store["userName"].as_str().map(str::to_string)
}

fn read_request_body(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0usize;
    let mut chunked = false;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("header line");
        let line = line.trim_end().to_ascii_lowercase();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("content-length:") {
            content_length = value.trim().parse().expect("content length");
        }
        if line.starts_with("transfer-encoding:") && line.contains("chunked") {
            chunked = true;
        }
    }

    let mut body = Vec::new();
    if chunked {
        loop {
            let mut size = String::new();
            reader.read_line(&mut size).expect("chunk size");
            let n = usize::from_str_radix(size.trim(), 16).expect("chunk size hex");
            let mut chunk = vec![0u8; n + 2];
            reader.read_exact(&mut chunk).expect("chunk");
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
        }
    } else {
        body.resize(content_length, 0);
        reader.read_exact(&mut body).expect("body");
    }
    String::from_utf8(body).expect("body utf8")
}

/// One-shot chat endpoint; yields the request body it received
fn serve_once(body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let request_body = read_request_body(&stream);
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        (&stream).write_all(response.as_bytes()).expect("respond");
        request_body
    });
    (format!("http://{addr}/chat"), handle)
}

fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/chat")
}

#[test]
fn name_set_stores_trimmed_name() {
    let home = unique_temp_dir("name-set");

    let (ok, stdout, stderr) = run_chatline(&["name", "set", "  Alice  "], &home, "");
    assert!(ok, "stderr: {stderr}");
    assert!(stdout.contains("Display name set to Alice"), "stdout: {stdout}");
    assert_eq!(stored_name(&home).as_deref(), Some("Alice"));

    let (ok, stdout, _) = run_chatline(&["name"], &home, "");
    assert!(ok);
    assert_eq!(stdout.trim(), "Alice");

    let (ok, _, _) = run_chatline(&["name", "reset"], &home, "");
    assert!(ok);
    assert_eq!(stored_name(&home), None);

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn name_set_rejects_short_name() {
    let home = unique_temp_dir("name-short");

    let (ok, _, stderr) = run_chatline(&["name", "set", " A "], &home, "");
    assert!(!ok);
    assert!(
        stderr.contains("Name must be at least 2 characters long"),
        "stderr: {stderr}"
    );
    assert_eq!(stored_name(&home), None);

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn send_without_name_fails() {
    let home = unique_temp_dir("send-no-name");

    let (ok, _, stderr) = run_chatline(&["send", "Hi"], &home, "");
    assert!(!ok);
    assert!(stderr.contains("chatline name set"), "stderr: {stderr}");

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn send_json_appends_reply() {
    let home = unique_temp_dir("send-json");
    let (ok, _, _) = run_chatline(&["name", "set", "Alice"], &home, "");
    assert!(ok);

    let (url, server) = serve_once(r#"{"response":"Hello!","mood":"positive"}"#);
    let (ok, stdout, stderr) =
        run_chatline(&["send", "Hi", "--json", "--endpoint", &url], &home, "");
    assert!(ok, "stderr: {stderr}");

    let sent: Value = serde_json::from_str(&server.join().expect("server")).expect("request");
    assert_eq!(sent["user_input"], "Hi");
    assert_eq!(sent["user_id"], "Alice");

    let json: Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(json["user"], "Alice");
    assert_eq!(json["typing"], false);
    let messages = json["messages"].as_array().expect("messages");
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["text"], "Hey, Hi");
    assert_eq!(messages[0]["sender"], "other");
    assert_eq!(messages[1]["text"], "Hi");
    assert_eq!(messages[1]["sender"], "user");
    assert_eq!(messages[1]["status"], "seen");
    assert_eq!(messages[2]["text"], "Hello!");
    assert_eq!(messages[2]["sender"], "other");
    assert!(messages[2].get("status").is_none());

    let ids: Vec<u64> = messages
        .iter()
        .map(|m| m["id"].as_u64().expect("id"))
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn malformed_reply_is_dropped_silently() {
    let home = unique_temp_dir("send-malformed");
    let (ok, _, _) = run_chatline(&["name", "set", "Alice"], &home, "");
    assert!(ok);

    let (url, server) = serve_once("<html>oops</html>");
    let (ok, stdout, stderr) =
        run_chatline(&["send", "Hi", "--json", "--endpoint", &url], &home, "");
    server.join().expect("server");
    assert!(ok, "stderr: {stderr}");
    assert!(!stderr.contains("malformed"), "stderr: {stderr}");

    let json: Value = serde_json::from_str(&stdout).expect("json output");
    let texts: Vec<&str> = json["messages"]
        .as_array()
        .expect("messages")
        .iter()
        .map(|m| m["text"].as_str().expect("text"))
        .collect();
    assert_eq!(texts, vec!["Hey, Hi", "Hi"]);
    assert_eq!(json["typing"], false);

    let log = fs::read_to_string(home.join("chatline.log")).expect("log file");
    assert!(log.contains("chat request failed"), "log: {log}");

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn unreachable_endpoint_keeps_local_message() {
    let home = unique_temp_dir("send-unreachable");
    let (ok, _, _) = run_chatline(&["name", "set", "Alice"], &home, "");
    assert!(ok);

    let url = unreachable_endpoint();
    let (ok, stdout, stderr) = run_chatline(
        &["send", "are", "you", "there?", "--json", "--endpoint", &url],
        &home,
        "",
    );
    assert!(ok, "stderr: {stderr}");

    let json: Value = serde_json::from_str(&stdout).expect("json output");
    let messages = json["messages"].as_array().expect("messages");
    assert_eq!(messages.last().expect("last")["text"], "are you there?");
    assert_eq!(messages.len(), 2);

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn greeting_can_be_disabled() {
    let home = unique_temp_dir("no-greeting");
    write_file(&home.join("config.toml"), "greeting = \"\"\n");
    let (ok, _, _) = run_chatline(&["name", "set", "Alice"], &home, "");
    assert!(ok);

    let (url, server) = serve_once(r#"{"response":"Hello!"}"#);
    let (ok, stdout, stderr) =
        run_chatline(&["send", "Hi", "--json", "--endpoint", &url], &home, "");
    server.join().expect("server");
    assert!(ok, "stderr: {stderr}");

    let json: Value = serde_json::from_str(&stdout).expect("json output");
    let texts: Vec<&str> = json["messages"]
        .as_array()
        .expect("messages")
        .iter()
        .map(|m| m["text"].as_str().expect("text"))
        .collect();
    assert_eq!(texts, vec!["Hi", "Hello!"]);

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn chat_prompts_for_name_until_valid() {
    let home = unique_temp_dir("chat-gate");

    let (ok, stdout, stderr) = run_chatline(&["chat"], &home, "A\nAlice\n/quit\n");
    assert!(ok, "stderr: {stderr}");
    assert!(stdout.contains("Lonely? Never again."), "stdout: {stdout}");
    assert!(
        stdout.contains("Name must be at least 2 characters long"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("Hey, Hi"), "stdout: {stdout}");
    assert_eq!(stored_name(&home).as_deref(), Some("Alice"));

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn chat_ends_quietly_when_input_closes_before_name() {
    let home = unique_temp_dir("chat-eof");

    let (ok, stdout, _) = run_chatline(&["chat"], &home, "");
    assert!(ok);
    assert!(stdout.contains("Enter your name to continue:"), "stdout: {stdout}");
    assert_eq!(stored_name(&home), None);

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn status_json_reports_paths() {
    let home = unique_temp_dir("status");
    let (ok, _, _) = run_chatline(&["name", "set", "Alice"], &home, "");
    assert!(ok);

    let (ok, stdout, stderr) = run_chatline(&["status", "--json"], &home, "");
    assert!(ok, "stderr: {stderr}");
    let json: Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(json["user"], "Alice");
    assert_eq!(json["peer"], "Sarah");
    assert_eq!(
        json["store_file"].as_str(),
        Some(home.join("store.json").to_string_lossy().as_ref())
    );

    let _ = fs::remove_dir_all(&home);
}
