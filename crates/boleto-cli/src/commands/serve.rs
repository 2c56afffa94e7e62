//! Serve command - run the HTTP upload server.

use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::info;

use boleto_core::{DocumentClassifier, ExtractionPipeline, PdfExtractor, SqliteStore};

use crate::server;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database URL (overrides config)
    #[arg(long)]
    database_url: Option<String>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    let store = SqliteStore::connect(&config.database).await?;
    let pipeline = ExtractionPipeline::new(Arc::new(PdfExtractor::new()), Arc::new(store))
        .with_classifier(DocumentClassifier::from_config(&config.extraction));

    let app = server::build_router(pipeline, config.server.max_upload_bytes);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    println!(
        "{} Listening on http://{}{}",
        style("✓").green(),
        addr,
        server::UPLOAD_ROUTE
    );

    axum::serve(listener, app).await?;

    Ok(())
}
