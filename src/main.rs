//! Live preview bridge (v1)
//!
//! Answers an interceptor's content requests for one project over
//! newline-delimited JSON on stdin/stdout.
//!
//! # Architecture Overview
//!
//! ```text
//!     stdin ──▶ pump_inbound ──▶ BroadcastChannel ──▶ RequestCorrelator
//!                                      ▲                    │
//!                                      │      overlays / documents / markdown
//!                                      └────────────────────┘
//!     stdout ◀── outbound pump ◀── REQUEST_RESPONSE
//!     stdout ◀── LineRegistry  ◀── setInstrumentedURLs (StaticServer mutations)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;

use live_preview_bridge::channel::stdio::{self, LineRegistry, LineWriter};
use live_preview_bridge::channel::InstanceId;
use live_preview_bridge::config::{self, validation::validate_config, BridgeConfig, ConfigError};
use live_preview_bridge::documents::FsDocumentSource;
use live_preview_bridge::lifecycle::shutdown::{join_logged, trigger_on_ctrl_c};
use live_preview_bridge::markdown::{MarkdownPage, PageResources};
use live_preview_bridge::observability::logging;
use live_preview_bridge::server::ActiveServers;
use live_preview_bridge::{BroadcastChannel, LiveServer, RequestCorrelator, Shutdown, StaticServer};

#[derive(Parser, Debug)]
#[command(name = "live-preview-bridge")]
#[command(about = "Serve editor content to a live preview interceptor", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root (overrides config)
    #[arg(short, long)]
    root: Option<String>,

    /// Editor instance identifier (overrides config)
    #[arg(long)]
    instance_id: Option<String>,

    /// Serve FILE's contents in place of PATH, e.g. --virtual /p/index.html=draft.html
    #[arg(long = "virtual", value_name = "PATH=FILE")]
    virtuals: Vec<String>,
}

fn load(cli: &Cli) -> Result<BridgeConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => BridgeConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.server.project_root = root.clone();
    }
    if let Some(id) = &cli.instance_id {
        config.server.instance_id = Some(id.clone());
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    logging::init(&config.observability);
    tracing::info!("live-preview-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    let instance_id = config
        .server
        .instance_id
        .clone()
        .map(InstanceId::new)
        .unwrap_or_else(InstanceId::generate);

    tracing::info!(
        instance_id = %instance_id,
        project_root = %config.server.normalized_root(),
        server_url = %config.server.server_url,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let channel = BroadcastChannel::with_capacity(config.channel.capacity);
    let (writer, writer_task) = LineWriter::spawn(tokio::io::stdout());
    let active = ActiveServers::global().clone();
    let documents = Arc::new(FsDocumentSource::scoped(config.server.normalized_root()));

    let server = StaticServer::new(
        &config.server,
        instance_id.clone(),
        Arc::new(LineRegistry::new(writer.clone())),
        active.clone(),
    );

    for spec in &cli.virtuals {
        let Some((path, file)) = spec.split_once('=') else {
            return Err(format!("invalid --virtual value '{}', expected PATH=FILE", spec).into());
        };
        let text = tokio::fs::read_to_string(file).await?;
        server.add_virtual_content_at_path(path, text);
    }

    server.start()?;

    // Subscribers first, then the inbound feed.
    let page = MarkdownPage::new(PageResources::from_base(&config.markdown.resource_base_url));
    let correlator = RequestCorrelator::new(instance_id, channel.clone(), active, documents, page)
        .spawn(shutdown.subscribe());
    let outbound = stdio::spawn_outbound(&channel, writer, shutdown.subscribe());
    tokio::spawn(trigger_on_ctrl_c(shutdown.clone()));

    let inbound = stdio::pump_inbound(
        BufReader::new(tokio::io::stdin()),
        channel,
        shutdown.subscribe(),
    )
    .await;
    if let Err(e) = inbound {
        tracing::error!(error = %e, "Inbound stream failed");
    }
    shutdown.trigger();

    join_logged("correlator", correlator).await;
    join_logged("outbound", outbound).await;
    server.stop();
    drop(server);
    if let Some(Err(e)) = join_logged("writer", writer_task).await {
        tracing::error!(error = %e, "Output stream failed");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
