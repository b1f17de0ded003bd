use std::io::{self, BufRead, Write};

use tutordeskd::gateway::{Gateway, HttpTransport};
use tutordeskd::{config, ipc};

fn main() -> anyhow::Result<()> {
    // stdout carries the IPC protocol; logging goes to stderr.
    env_logger::init();

    let base_url = config::api_base_url();
    log::info!("tutordeskd {} -> {}", env!("CARGO_PKG_VERSION"), base_url);

    let transport = HttpTransport::new()?;
    let gateway = Gateway::new(&base_url, Box::new(transport));
    let mut state = ipc::AppState::new(gateway);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id; ignore.
                let _ = writeln!(
                    stdout,
                    "{{\"ok\":false,\"error\":{{\"code\":\"bad_json\",\"message\":\"{}\"}}}}",
                    e
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    Ok(())
}
