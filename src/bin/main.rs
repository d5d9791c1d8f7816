//! Ordinal Minter CLI
//!
//!   ordinal-minter serve         → Start the HTTP API
//!   ordinal-minter collections   → Print seeded collections as JSON
//!   ordinal-minter demo          → Run connect → upload → preview → mint in-process
//!
//! Configuration comes from flags, then `MINTER_*` env vars, then `.env`.

use ordinal_minter::flow::{MintFlow, ServiceBackend, StaticWallet, WalletSession};
use ordinal_minter::core::constants::app;
use ordinal_minter::logging::init_logging;
use ordinal_minter::minter::load_dotenv;
use ordinal_minter::{create_router_with_name, install_signal_handlers, Minter, MinterConfig, Quality, Upload};
use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const DEMO_WALLET: &str = "1DemoWa11etAddre55xxxxxxxxxxxxxxxx";
// 1x1 transparent PNG
const DEMO_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49,
    0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);
    let log_format = init_logging();
    debug!(?log_format, "logging initialised");
    if opts.dotenv_loaded > 0 {
        debug!(loaded = opts.dotenv_loaded, "applied .env");
    }

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("ordinal-minter {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("serve") => cmd_serve(&opts),
        Some("collections") => cmd_collections(&opts),
        Some("demo") => cmd_demo(&opts),
        Some(cmd) => Err(format!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = opts.pretty || (!opts.json && std::io::stdout().is_terminal());
    let render = |value: &Value| {
        let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
        rendered.unwrap_or_else(|_| value.to_string())
    };

    match result {
        Ok(output) => println!("{}", render(&output)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": e})));
            std::process::exit(1);
        }
    }
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    app: Option<String>,
    bind: Option<String>,
    port: Option<u16>,
    chain_delay_ms: Option<u64>,
    wallet: Option<String>,
    quality: Option<String>,
    collection: Option<String>,
    json: bool,
    pretty: bool,
    help: bool,
    version: bool,
    dotenv_loaded: usize,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs { dotenv_loaded: load_dotenv(".env"), ..Default::default() };
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            let next = args.get(i + 1).cloned();
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--json" => opts.json = true,
                "--pretty" => opts.pretty = true,
                "--app" | "-a" if next.is_some() => { opts.app = next; i += 1; }
                "--bind" | "-b" if next.is_some() => { opts.bind = next; i += 1; }
                "--port" | "-p" if next.is_some() => {
                    opts.port = next.and_then(|p| p.parse().ok());
                    i += 1;
                }
                "--chain-delay" if next.is_some() => {
                    opts.chain_delay_ms = next.and_then(|ms| ms.parse().ok());
                    i += 1;
                }
                "--wallet" | "-w" if next.is_some() => { opts.wallet = next; i += 1; }
                "--quality" | "-q" if next.is_some() => { opts.quality = next; i += 1; }
                "--collection" | "-c" if next.is_some() => { opts.collection = next; i += 1; }
                _ if !arg.starts_with('-') && opts.command.is_none() => opts.command = Some(arg.clone()),
                _ => {}
            }
            i += 1;
        }

        opts
    }

    /// Flags win over `MINTER_*` env vars.
    fn config(&self) -> MinterConfig {
        let mut config = MinterConfig::from_env();
        if let Some(app) = &self.app { config.app = app.clone(); }
        if let Some(bind) = &self.bind { config.bind = bind.clone(); }
        if let Some(port) = self.port { config.port = port; }
        if let Some(ms) = self.chain_delay_ms { config.chain_delay = Duration::from_millis(ms); }
        config
    }
}

fn print_usage() {
    println!(
        r#"ordinal-minter - 2D Ordinal → 3D Ordinal on a simulated BSV chain

USAGE:
    ordinal-minter <command> [options]

COMMANDS:
    serve                       Start the HTTP API
    collections                 Print seeded collections
    demo                        Run the full mint flow in-process and print the receipt

SERVER OPTIONS:
    --app, -a <name>            Service name reported by /health (env: MINTER_APP)
    --bind, -b <addr>           Bind address (default: 0.0.0.0, env: MINTER_BIND)
    --port, -p <port>           Port (default: 5000, env: MINTER_PORT)
    --chain-delay <ms>          Simulated broadcast latency (env: MINTER_CHAIN_DELAY_MS)

DEMO OPTIONS:
    --wallet, -w <address>      Wallet address to mint as
    --quality, -q <quality>     standard | high | ultra (default: standard)
    --collection, -c <slug>     Collection slug (default: first collection)

OUTPUT OPTIONS:
    --json                      Raw JSON output
    --pretty                    Pretty-print JSON
    --version, -V               Print version

LOGGING:
    RUST_LOG=<filter>           Log filter (default: info)
    MINTER_LOG_JSON=1           JSON log lines on stderr

ENDPOINTS:
    GET  /health
    POST /api/ordinals/validate
    GET  /api/ordinals/generate3d/:id?quality=
    POST /api/ordinals/mint3d
    GET  /api/ordinals/mint3d/transactions/:id
    GET  /api/ordinals/recent | /user/:address | /search?q= | /examples | /:id
    GET  /api/collections
    GET  /api/collections/:id/stats
"#
    );
}

fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Runtime::new().map_err(|e| format!("Failed to create runtime: {}", e))
}

fn cmd_serve(opts: &ParsedArgs) -> Result<Value, String> {
    let config = opts.config();
    let addr = config.addr();
    let app_name = config.app.clone();
    let minter = Arc::new(Minter::from_config(config));

    runtime()?.block_on(async {
        let shutdown = install_signal_handlers();
        let router = create_router_with_name(minter, &app_name);

        let listener = tokio::net::TcpListener::bind(&addr).await
            .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;

        info!("{} listening on http://{}", app_name, addr);
        info!("  GET  /health                       - Health check");
        info!("  POST /api/ordinals/validate        - Validate an uploaded ordinal");
        info!("  POST /api/ordinals/mint3d          - Mint a 3D ordinal");
        debug!("  GET  /api/collections/:id/stats    - Collection stats");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.signalled())
            .await
            .map_err(|e| format!("Server error: {}", e))?;

        info!("server stopped");
        Ok::<(), String>(())
    })?;

    Ok(json!({"status": "stopped"}))
}

fn cmd_collections(opts: &ParsedArgs) -> Result<Value, String> {
    let minter = Minter::from_config(opts.config());
    let collections = minter.collections().map_err(|e| e.to_string())?;
    serde_json::to_value(collections).map_err(|e| e.to_string())
}

fn cmd_demo(opts: &ParsedArgs) -> Result<Value, String> {
    let config = opts.config();
    let minter = Arc::new(Minter::from_config(config));
    let quality = opts.quality.as_deref().map(Quality::from_label).unwrap_or_default();
    let address = opts.wallet.clone().unwrap_or_else(|| DEMO_WALLET.to_string());

    let mut backend = ServiceBackend::new(minter.clone());
    if let Some(slug) = &opts.collection {
        backend = backend.with_collection(slug.clone());
    }

    runtime()?.block_on(async move {
        let mut session = WalletSession::new(Some(StaticWallet::new(address)));
        if !session.connect().await {
            let reason = session.notices.last().map(|n| n.description.clone()).unwrap_or_default();
            return Err(format!("Wallet connection failed: {}", reason));
        }
        let address = session.address().unwrap_or_default().to_string();

        let mut flow = MintFlow::new(backend);
        flow.wallet_connected(&address).map_err(|e| e.to_string())?;
        flow.select_file(Upload::new("demo-fox.png", "image/png", DEMO_PNG.to_vec()))
            .map_err(|e| e.to_string())?;
        let ordinal = flow.validate().await.map_err(|e| e.to_string())?;
        info!(ordinal = %ordinal.ordinal_id, collection = %ordinal.collection_name, "preview ready");

        let receipt = flow.mint(quality).await.map_err(|e| e.to_string())?;
        Ok(json!({
            "wallet": address,
            "network": minter.network(),
            "quality": quality.label(),
            "ordinal": ordinal,
            "artifact": flow.artifact(),
            "explorer": format!("{}{}", app::EXPLORER_URL, receipt.tx_id),
            "receipt": receipt,
            "state": flow.state(),
        }))
    })
}
