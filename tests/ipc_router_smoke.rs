use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

// End-to-end over the real stdio loop. Only methods that never touch the
// backend are exercised here; everything network-shaped is covered by the
// in-process suites.

struct Daemon {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<std::process::ChildStdout>,
}

impl Daemon {
    fn spawn() -> Daemon {
        let mut child = Command::new(env!("CARGO_BIN_EXE_tutordeskd"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn daemon");
        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));
        Daemon {
            child,
            stdin,
            stdout,
        }
    }

    fn request(&mut self, req: serde_json::Value) -> serde_json::Value {
        writeln!(self.stdin, "{}", req).expect("write request");
        let mut line = String::new();
        self.stdout.read_line(&mut line).expect("read response");
        serde_json::from_str(&line).expect("response is json")
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn temp_state_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("tutordeskd-smoke-{}", uuid::Uuid::new_v4()))
}

#[test]
fn daemon_answers_over_stdio() {
    let mut d = Daemon::spawn();
    let dir = temp_state_dir();

    let health = d.request(serde_json::json!({ "id": "1", "method": "health", "params": {} }));
    assert_eq!(health["id"], "1");
    assert_eq!(health["ok"], true);
    assert!(health["result"]["version"].as_str().is_some());
    assert!(health["result"]["apiBaseUrl"].as_str().is_some());

    let opened = d.request(serde_json::json!({
        "id": "2",
        "method": "state.open",
        "params": { "path": dir.to_string_lossy() }
    }));
    assert_eq!(opened["ok"], true);

    let status = d.request(serde_json::json!({
        "id": "3",
        "method": "session.status",
        "params": {}
    }));
    assert_eq!(status["ok"], true);
    assert_eq!(status["result"]["authenticated"], false);

    let guard = d.request(serde_json::json!({
        "id": "4",
        "method": "guard.check",
        "params": { "path": "/admin" }
    }));
    assert_eq!(guard["result"]["decision"], "redirect");
    assert_eq!(guard["result"]["to"], "/login");

    let unknown = d.request(serde_json::json!({
        "id": "5",
        "method": "no.such.method",
        "params": {}
    }));
    assert_eq!(unknown["ok"], false);
    assert_eq!(unknown["error"]["code"], "not_implemented");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn malformed_line_does_not_kill_the_loop() {
    let mut d = Daemon::spawn();

    writeln!(d.stdin, "this is not json").expect("write garbage");
    let mut line = String::new();
    d.stdout.read_line(&mut line).expect("read error reply");
    let resp: serde_json::Value = serde_json::from_str(&line).expect("error reply is json");
    assert_eq!(resp["ok"], false);
    assert_eq!(resp["error"]["code"], "bad_json");

    // The daemon keeps serving after the bad line.
    let health = d.request(serde_json::json!({ "id": "9", "method": "health", "params": {} }));
    assert_eq!(health["ok"], true);
}
