//! Basic orchestrator request flow against in-memory/scripted backends.

use anyhow::Result;

#[cfg(feature = "mock")]
#[tokio::main]
async fn main() -> Result<()> {
    use std::sync::Arc;

    use sentinel::background::BackgroundWriter;
    use sentinel::cache::CacheLookup;
    use sentinel::embedding::StubEmbedder;
    use sentinel::evaluator::AlwaysMatch;
    use sentinel::extractor::EmptyExtractor;
    use sentinel::limiter::InMemoryLimiter;
    use sentinel::model::Request;
    use sentinel::orchestrator::Orchestrator;
    use sentinel::provider::ScriptedProvider;
    use sentinel::vectorstore::InMemoryVectorStore;
    use std::collections::HashMap;

    let store = Arc::new(InMemoryVectorStore::new());
    let limiter = Arc::new(InMemoryLimiter::new(10_000));
    let provider = Arc::new(ScriptedProvider::succeeding("Paris is the capital of France."));

    let orchestrator = Orchestrator::new(
        limiter.clone(),
        Arc::new(EmptyExtractor),
        Arc::new(StubEmbedder::new()),
        CacheLookup::new(store.clone(), Arc::new(AlwaysMatch::new())),
        provider,
        BackgroundWriter::new(store, limiter),
    );

    let request = Request {
        user_id: "demo-user".to_string(),
        prompt: "What is the capital of France?".to_string(),
        provider: String::new(),
        model: String::new(),
        metadata: HashMap::new(),
        temperature: 0.0,
        timestamp: chrono::Utc::now(),
    };

    let response = orchestrator.execute(&request).await?;
    println!("cached={} content={}", response.cached, response.content);

    Ok(())
}

#[cfg(not(feature = "mock"))]
fn main() {
    eprintln!("Run with: cargo run --example basic_lookup --features mock");
}
