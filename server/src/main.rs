mod config;
mod error;
mod routes;
mod supplier;

use rand::{rngs::StdRng, SeedableRng};
use shared::words::VOCABULARY;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, routes::AppState, supplier::VocabularySupplier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    let vocabulary = match &config.words_file {
        Some(path) => supplier::load_word_file(path)?,
        None => VOCABULARY.iter().map(|w| w.to_string()).collect(),
    };
    info!(
        "Serving {} words per request from {} vocabulary entries x {}",
        config.words_per_request,
        vocabulary.len(),
        config.copies
    );
    let supplier = VocabularySupplier::new(
        vocabulary,
        config.words_per_request,
        config.copies,
        StdRng::from_entropy(),
    )?;

    let app = routes::router(AppState::new(supplier), &config.dist_dir);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
