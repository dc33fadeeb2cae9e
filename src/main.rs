use std::path::Path;
use std::sync::Arc;

use support_desk::config::DeskConfig;
use support_desk::embedding::create_embedder;
use support_desk::handlers::{ExternalInfoHandler, KnowledgeSearchHandler, RecordLookupHandler};
use support_desk::http::chat_routes;
use support_desk::pipeline::Pipeline;
use support_desk::store::{LibSqlStore, SupportStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = DeskConfig::from_env()?;

    eprintln!("🛠️  Support Desk v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path);
    eprintln!("   Embeddings: {}", config.embedding.model);
    eprintln!("   Chat API: http://0.0.0.0:{}/chat", config.http_port);
    eprintln!("   Health: http://0.0.0.0:{}/health\n", config.http_port);

    // ── Store ───────────────────────────────────────────────────────────
    let store: Arc<dyn SupportStore> = if config.db_path == ":memory:" {
        Arc::new(LibSqlStore::new_memory().await?)
    } else {
        Arc::new(LibSqlStore::new_local(Path::new(&config.db_path)).await?)
    };

    // ── Knowledge corpus ────────────────────────────────────────────────
    let embedder = create_embedder(&config.embedding)?;
    let knowledge = KnowledgeSearchHandler::load(embedder).await?;

    // ── Pipeline ────────────────────────────────────────────────────────
    let pipeline = Arc::new(Pipeline::new(
        Arc::new(RecordLookupHandler::new(store)),
        Arc::new(knowledge),
        Arc::new(ExternalInfoHandler::new()),
    ));

    // ── HTTP transport ──────────────────────────────────────────────────
    let app = chat_routes(pipeline, config.history_cap);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.http_port)).await?;
    tracing::info!(port = config.http_port, "Support desk listening");
    axum::serve(listener, app).await?;

    Ok(())
}
