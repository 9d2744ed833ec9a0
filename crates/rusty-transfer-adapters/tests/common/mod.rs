#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;

use alloy::primitives::Address;
use serde_json::{json, Value};
use tiny_http::{Response, Server, StatusCode};

use rusty_transfer_adapters::{Eip1193Adapter, TransferAdapterConfig};

/// Recorded JSON-RPC request: method and params.
pub type Calls = Arc<Mutex<Vec<(String, Value)>>>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn account() -> Address {
    "0x2000000000000000000000000000000000000002"
        .parse()
        .expect("valid account address")
}

pub fn recipient() -> Address {
    "0x000000000000000000000000000000000000CAFE"
        .parse()
        .expect("valid recipient address")
}

pub fn ok(result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "result": result})
}

pub fn rpc_err(code: i64, message: &str) -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "error": {"code": code, "message": message}})
}

/// Serves JSON-RPC over HTTP, answering each request with `handler(method, params)`.
pub fn spawn_rpc_server<F>(handler: F) -> (String, Calls, thread::JoinHandle<()>)
where
    F: Fn(&str, &Value) -> Value + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);

    let join = thread::spawn(move || {
        for _ in 0..64 {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut body = String::new();
            if req.as_reader().read_to_string(&mut body).is_err() {
                let response = Response::from_string("bad body").with_status_code(StatusCode(400));
                let _ = req.respond(response);
                continue;
            }
            let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let method = request
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            let params = request.get("params").cloned().unwrap_or(Value::Null);
            if let Ok(mut g) = recorded.lock() {
                g.push((method.clone(), params.clone()));
            }

            let payload = handler(&method, &params);
            let _ = req.respond(Response::from_string(payload.to_string()));
        }
    });

    (addr, calls, join)
}

pub fn proxy_adapter(base_url: String) -> Eip1193Adapter {
    init_tracing();
    Eip1193Adapter::with_config(TransferAdapterConfig {
        eip1193_proxy_url: Some(base_url),
        request_timeout_ms: 5_000,
        receipt_poll_interval_ms: 10,
        ..TransferAdapterConfig::default()
    })
}

pub fn methods(calls: &Calls) -> Vec<String> {
    calls
        .lock()
        .expect("calls lock")
        .iter()
        .map(|(m, _)| m.clone())
        .collect()
}
