use anyhow::Result;
use clap::Parser;
use popquiz::{run_server, ServerConfig, MAX_CONTINUATIONS};

/// Continuation-based quiz builder and player.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Host address to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Maximum number of suspended sessions kept before the oldest are
    /// evicted.
    #[arg(long, default_value_t = MAX_CONTINUATIONS)]
    max_continuations: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    run_server(ServerConfig {
        host: args.host,
        port: args.port,
        max_continuations: args.max_continuations,
    })
    .await
}
