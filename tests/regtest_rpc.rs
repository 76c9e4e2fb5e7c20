//! End-to-end checks against a live regtest node. Ignored by default; point
//! the `DEVAULT_TEST_*` variables at a running node to exercise them.

use std::env;
use std::sync::{Arc, Once};

use devault_rpc::{BlockChain, Config, DeVaultRpc, HttpTransport};

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("devault_rpc=debug")),
            )
            .with_target(true)
            .try_init();
    });
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a local regtest node; set DEVAULT_TEST_RPC_URL/USER/PASS"]
async fn regtest_adapter_initializes_and_fetches_blocks() {
    init_tracing();

    let rpc_url = env::var("DEVAULT_TEST_RPC_URL").expect("DEVAULT_TEST_RPC_URL must be set");
    let rpc_user = env::var("DEVAULT_TEST_RPC_USER").expect("DEVAULT_TEST_RPC_USER must be set");
    let rpc_pass = env::var("DEVAULT_TEST_RPC_PASS").expect("DEVAULT_TEST_RPC_PASS must be set");

    let config = Config {
        rpc_url: rpc_url.clone(),
        rpc_user: Some(rpc_user),
        rpc_pass: Some(rpc_pass),
        cookie_file: None,
        coin_shortcut: "DVT".into(),
        requests_per_second: None,
    };
    let transport = HttpTransport::from_config(&config).expect("transport must construct");
    let rpc = DeVaultRpc::new(&config, Arc::new(transport));

    eprintln!("[itest] initializing adapter against {rpc_url}");
    rpc.initialize().await.expect("initialize must succeed");
    assert!(
        rpc.network_mode().expect("initialized").is_testnet(),
        "regtest node must resolve to test mode"
    );

    let info = rpc
        .get_chain_info()
        .await
        .expect("get_chain_info must succeed");
    assert_eq!(info.chain, "regtest");

    let hash = rpc
        .get_block_hash(1)
        .await
        .expect("block 1 must exist on a mined regtest chain");

    let header = rpc
        .get_block_header(&hash)
        .await
        .expect("header fetch must succeed");
    assert_eq!(header.hash, hash);
    assert_eq!(header.height, 1);

    let raw = rpc.get_block_raw(&hash).await.expect("raw fetch");
    assert!(!raw.is_empty());

    let block = rpc.get_block(&hash, 0).await.expect("full fetch");
    assert_eq!(block.header.hash, hash);
    assert_eq!(
        block.header.size,
        raw.len() as u64,
        "size must come from the raw parse"
    );
    assert!(!block.txs.is_empty());

    let by_height = rpc.get_block("", 1).await.expect("fetch by height");
    assert_eq!(by_height.header.hash, hash);
}
