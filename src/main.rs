//! Sentinel gateway HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use sentinel::background::BackgroundWriter;
use sentinel::cache::CacheLookup;
use sentinel::config::Config;
use sentinel::embedding::{Embedder, GenAiEmbedder};
use sentinel::evaluator::GenAiEvaluator;
use sentinel::extractor::GenAiExtractor;
use sentinel::limiter::RedisLimiter;
use sentinel::orchestrator::Orchestrator;
use sentinel::provider::{AIProvider, GenAiProvider, ResilientProvider};
use sentinel::server::{self, AppState};
use sentinel::vectorstore::QdrantVectorStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "sentinel-gateway starting"
    );

    let vector_store = Arc::new(QdrantVectorStore::new(&config.qdrant_url, &config.qdrant_collection)?);
    vector_store.init_collection(config.embedding_dim).await?;

    let limiter = Arc::new(RedisLimiter::connect(&config.limiter_url, config.per_user_token_cap).await?);

    let genai_client = genai::Client::default();
    let embedder = Arc::new(GenAiEmbedder::new(genai_client.clone(), config.embedding_model.clone()));
    let extractor = Arc::new(GenAiExtractor::new(genai_client.clone(), config.extractor_model.clone()));
    let evaluator = Arc::new(GenAiEvaluator::new(genai_client.clone(), config.evaluator_model.clone()));

    let primary = Arc::new(GenAiProvider::new(genai_client.clone(), config.primary_model.clone()));
    let fallback = Arc::new(GenAiProvider::new(genai_client, config.fallback_model.clone()));
    let provider = Arc::new(ResilientProvider::new(primary, fallback));

    let cache = CacheLookup::new(vector_store.clone(), evaluator.clone());
    let writer = BackgroundWriter::new(vector_store, limiter.clone());

    spawn_warmup(embedder.clone(), provider.clone());

    let orchestrator = Arc::new(Orchestrator::new(limiter, extractor, embedder, cache, provider, writer));
    let app = server::router(AppState::new(orchestrator));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "sentinel-gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("sentinel-gateway shutdown complete");
    Ok(())
}

/// Fires a detached embedder + provider warm-up so the first real request doesn't
/// pay a cold-start penalty on either backend. Bounded to 30s; failures are logged
/// and otherwise ignored.
fn spawn_warmup<E, P>(embedder: Arc<E>, provider: Arc<P>)
where
    E: Embedder + 'static,
    P: AIProvider + 'static,
{
    tokio::spawn(async move {
        let warm = async {
            if let Err(e) = embedder.create_embedding("warmup").await {
                tracing::warn!(error = %e, "[SENTINEL-WARMER] embedder warm-up failed");
            }
            if let Err(e) = provider.generate(".").await {
                tracing::warn!(error = %e, "[SENTINEL-WARMER] provider warm-up failed");
            }
        };

        if tokio::time::timeout(std::time::Duration::from_secs(30), warm)
            .await
            .is_err()
        {
            tracing::warn!("[SENTINEL-WARMER] warm-up exceeded its deadline");
        } else {
            tracing::info!("[SENTINEL-WARMER] pre-warm complete, gateway is hot");
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        }
    }
}
