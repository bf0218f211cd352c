#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct MockNode {
    pub chain_id: u64,
    pub block_number: u64,
    pub base_fee_wei: Option<u64>,
    pub gas_price_wei: u64,
    pub gas_price_delay: Option<Duration>,
    pub malformed_chain_id: bool,
}

impl Default for MockNode {
    fn default() -> Self {
        Self {
            chain_id: 1,
            block_number: 21_051_234,
            base_fee_wei: Some(8_340_000_000),
            gas_price_wei: 9_120_000_000,
            gas_price_delay: None,
            malformed_chain_id: false,
        }
    }
}

pub async fn spawn_node(node: MockNode) -> (String, JoinHandle<()>) {
    let app = Router::new()
        .route("/", post(handle_rpc))
        .with_state(Arc::new(node));
    serve(app).await
}

pub async fn spawn_bad_gateway() -> (String, JoinHandle<()>) {
    let app = Router::new().route(
        "/",
        post(|| async {
            (
                StatusCode::BAD_GATEWAY,
                "<html>\n<body>\n502 Bad Gateway\n</body>\n</html>\n",
            )
        }),
    );
    serve(app).await
}

/// An address nothing listens on.
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn serve(app: Router) -> (String, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);
    let server = axum::serve(listener, app);
    let handle = tokio::spawn(async move {
        let _ = server.await;
    });

    (url, handle)
}

async fn handle_rpc(State(node): State<Arc<MockNode>>, Json(req): Json<Value>) -> Json<Value> {
    let id = req.get("id").cloned().unwrap_or(Value::Null);
    let method = req.get("method").and_then(Value::as_str).unwrap_or_default();

    let result = match method {
        "eth_chainId" if node.malformed_chain_id => json!("not-a-quantity"),
        "eth_chainId" => json!(quantity(node.chain_id)),
        "eth_blockNumber" => json!(quantity(node.block_number)),
        "eth_getBlockByNumber" => block_json(&node),
        "eth_gasPrice" => {
            if let Some(delay) = node.gas_price_delay {
                tokio::time::sleep(delay).await;
            }
            json!(quantity(node.gas_price_wei))
        }
        other => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("method {other} not found") },
            }))
        }
    };

    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

fn block_json(node: &MockNode) -> Value {
    let mut block = json!({
        "hash": hash(node.block_number),
        "parentHash": hash(node.block_number - 1),
        "sha3Uncles": hash(0),
        "miner": format!("0x{:040x}", 0xfee),
        "stateRoot": hash(1),
        "transactionsRoot": hash(2),
        "receiptsRoot": hash(3),
        "number": quantity(node.block_number),
        "gasUsed": quantity(15_000_000),
        "gasLimit": quantity(30_000_000),
        "extraData": "0x",
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "timestamp": quantity(1_760_000_000),
        "difficulty": "0x0",
        "totalDifficulty": "0x0",
        "sealFields": [],
        "uncles": [],
        "transactions": [],
        "size": quantity(1_024),
        "mixHash": hash(4),
        "nonce": "0x0000000000000000",
    });
    if let Some(base_fee) = node.base_fee_wei {
        block["baseFeePerGas"] = json!(quantity(base_fee));
    }
    block
}

fn quantity(n: u64) -> String {
    format!("{:#x}", n)
}

fn hash(n: u64) -> String {
    format!("0x{:064x}", n)
}
