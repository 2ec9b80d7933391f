use odin_provider::config::OdinConfig;
use odin_provider::logging::{self, LogSink};
use odin_provider::mcp::OdinServer;
use odin_provider::transport::TransportMode;

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments first to determine mode
    let args: Vec<String> = std::env::args().collect();
    let (mode, port) = parse_args(&args);

    let config = match OdinConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // stdout belongs to the MCP protocol in stdio mode
    let sink = logging::init(mode == TransportMode::Stdio, &config.log_dir);
    if let LogSink::File(path) = &sink {
        tracing::info!("Logging to {}", path.display());
    }

    tracing::info!("Starting Odin Provider in {} mode...", mode);
    tracing::info!("Odin API: {}", config.api_base_url);

    let server = OdinServer::from_config(&config)?;

    match mode {
        TransportMode::Stdio => {
            odin_provider::transport::stdio::run_stdio_server(server).await?
        }
        TransportMode::Sse => run_sse_server(server, port).await?,
        TransportMode::Streamable => run_streamable_server(server, port).await?,
    }

    Ok(())
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> (TransportMode, u16) {
    let mut mode = TransportMode::default();
    let mut port: Option<u16> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                if i + 1 < args.len() {
                    mode = match args[i + 1].parse() {
                        Ok(mode) => mode,
                        Err(e) => {
                            eprintln!("{}", e);
                            print_usage();
                            std::process::exit(1);
                        }
                    };
                    i += 1;
                }
            }
            "--stdio" => mode = TransportMode::Stdio,
            "--sse" => mode = TransportMode::Sse,
            "--streamable" => mode = TransportMode::Streamable,
            "--port" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let port = port
        .filter(|p| *p != 0)
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(DEFAULT_PORT);

    (mode, port)
}

/// Print usage information
fn print_usage() {
    println!("Odin Provider - MCP server for Odin.fun token trading");
    println!();
    println!("USAGE:");
    println!("    odin-provider [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --mode <MODE>       Transport mode: stdio, sse, or streamable (default: stdio)");
    println!("    --stdio             Run in stdio MCP mode (shortcut for --mode stdio)");
    println!("    --sse               Run in SSE mode (shortcut for --mode sse)");
    println!("    --streamable        Run in streamable HTTP mode (shortcut for --mode streamable)");
    println!("    --port <PORT>       Port for network modes (default: $PORT or 3000)");
    println!("    --help, -h          Print this help message");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    ODIN_API_BASE_URL       Odin REST API base URL (default: https://api.odin.fun/v1)");
    println!("    ODIN_API_TOKEN          Bearer token for authenticated endpoints (optional)");
    println!("    ODIN_HTTP_TIMEOUT_SECS  REST request timeout in seconds (default: 10)");
    println!("    ODIN_IC_HOST            Internet Computer host (default: https://ic0.app)");
    println!("    ODIN_CANISTER_ID        Odin canister ID (default: z2vm5-gaaaa-aaaaj-azw6q-cai)");
    println!("    ODIN_IDENTITY_PEM       PEM identity for canister calls (default: anonymous)");
    println!("    ODIN_LOG_DIR            Log directory in stdio mode (default: ./logs)");
    println!("    RUST_LOG                Logging level (default: info)");
    println!();
    println!("EXAMPLES:");
    println!("    # Start in stdio mode (Claude Desktop and other local clients)");
    println!("    odin-provider --stdio");
    println!();
    println!("    # Start SSE server on a custom port");
    println!("    odin-provider --mode sse --port 8080");
}

#[cfg(feature = "http_transport")]
async fn run_sse_server(server: OdinServer, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    odin_provider::transport::sse::run_sse_server(server, port).await
}

#[cfg(not(feature = "http_transport"))]
async fn run_sse_server(
    _server: OdinServer,
    _port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::error!("SSE mode not available - compile with 'http_transport' feature");
    Err("SSE mode not available".into())
}

#[cfg(feature = "http_transport")]
async fn run_streamable_server(
    server: OdinServer,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    odin_provider::transport::streamable::run_streamable_server(server, port).await
}

#[cfg(not(feature = "http_transport"))]
async fn run_streamable_server(
    _server: OdinServer,
    _port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::error!("Streamable HTTP mode not available - compile with 'http_transport' feature");
    Err("Streamable HTTP mode not available".into())
}
