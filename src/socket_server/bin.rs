//! Langdetect Daemon Binary
//!
//! A WebSocket server answering language-detection requests.
//!
//! # Usage
//!
//! ```bash
//! langdetect-daemon --port 15151
//! HOST=0.0.0.0 PORT=9000 langdetect-daemon --default-backend vscode-regexp-languagedetection
//! ```
//!
//! Once the listener is bound the daemon prints `OK` on stdout; process
//! supervisors wait for that line before connecting.

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use langdetect_server::engine::ModelConfig;
use langdetect_server::socket_server::{serve, BackendRegistry, Dispatcher};

/// Langdetect Socket Server Daemon
#[derive(Parser, Debug)]
#[command(name = "langdetect-daemon")]
#[command(about = "Programming-language detection over WebSocket")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "localhost")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "15151")]
    port: u16,

    /// Backend used when a request names none or an unknown one
    #[arg(long, env = "LANGDETECT_DEFAULT_BACKEND", default_value = "vscode-languagedetection")]
    default_backend: String,

    /// Maximum number of predictions the model backend returns
    #[arg(long, env = "LANGDETECT_MAX_PREDICTIONS", default_value = "10")]
    max_predictions: usize,

    /// Content beyond this many bytes is ignored by the model backend
    #[arg(long, env = "LANGDETECT_MAX_CONTENT_BYTES", default_value = "100000")]
    max_content_bytes: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("langdetect_server=info".parse()?)
                .add_directive("langdetect_daemon=info".parse()?),
        )
        .init();

    let args = Args::parse();

    // Load grammars and compile rules once, before accepting clients
    let model_config = ModelConfig {
        max_predictions: args.max_predictions,
        max_content_bytes: args.max_content_bytes,
    };
    let registry = BackendRegistry::standard(model_config, &args.default_backend)?;
    tracing::info!(
        "Backends: {} (default: {})",
        registry.selectors().join(", "),
        registry.default_backend()
    );
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(registry)));

    // Start the TCP listener
    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    tracing::info!("Langdetect daemon listening on ws://{}", listener.local_addr()?);

    // Readiness line for whoever spawned us
    let mut stdout = std::io::stdout();
    writeln!(stdout, "OK")?;
    stdout.flush()?;

    serve(listener, dispatcher).await;
    Ok(())
}
