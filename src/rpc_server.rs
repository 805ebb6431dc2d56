//! collegefinder RPC server: JSON-RPC over stdin/stdout for the app shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"favorites.add", "params":{"college":{...}}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Requests run concurrently on a single thread, so responses may arrive out
//! of order; match them by `id`.

use std::io::{self, Write};
use std::rc::Rc;
use std::time::Instant;

use collegefinder::app::App;
use collegefinder::rpc_handler::handle_method;
use collegefinder::services::config_engine::{ConfigEngine, ConfigEngineTrait, ENV_CONFIG_PATH};

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::{JoinSet, LocalSet};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        let elapsed = self.window_start.elapsed();
        if elapsed.as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn emit(value: &Value) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}", value);
    let _ = out.flush();
}

async fn serve(app: Rc<Mutex<App>>) {
    emit(&json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}));

    let mut rate_limiter = RateLimiter::new(200);
    let mut in_flight = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                log::error!("stdin read failed: {}", e);
                break;
            }
        };
        while in_flight.try_join_next().is_some() {}
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&json!({"id":null,"error":format!("parse error: {}",e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            emit(&json!({"id": id, "error": "rate limit exceeded"}));
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("").to_string();
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let app = Rc::clone(&app);
        in_flight.spawn_local(async move {
            log::debug!("rpc {} {}", id, method);
            let response = match handle_method(&app, &method, &params).await {
                Ok(val) => json!({"id": id, "result": val}),
                Err(err) => json!({"id": id, "error": err}),
            };
            emit(&response);
        });
    }

    // Let pending requests answer before exiting.
    while in_flight.join_next().await.is_some() {}
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let mut config_engine = ConfigEngine::new(std::env::var(ENV_CONFIG_PATH).ok());
    let config = match config_engine.load() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("config loaded from {}", config_engine.get_config_path());

    let app = match App::new(config) {
        Ok(a) => Rc::new(Mutex::new(a)),
        Err(e) => {
            log::error!("failed to initialize collegefinder: {}", e);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };
    LocalSet::new().block_on(&runtime, serve(app));
}
