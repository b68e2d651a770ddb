use axum::{extract::State, routing::get, Json, Router};
use rand::rngs::StdRng;
use shared::{
    protocol::{WordsResponse, WORDS_PATH},
    words::WordSupplier,
};
use std::{path::Path, sync::Arc};
use tokio::sync::Mutex;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::debug;

use crate::{error::AppError, supplier::VocabularySupplier};

#[derive(Clone)]
pub struct AppState {
    supplier: Arc<Mutex<VocabularySupplier<StdRng>>>,
}

impl AppState {
    pub fn new(supplier: VocabularySupplier<StdRng>) -> Self {
        Self {
            supplier: Arc::new(Mutex::new(supplier)),
        }
    }
}

pub fn router(state: AppState, dist_dir: &Path) -> Router {
    Router::new()
        .route(WORDS_PATH, get(words_handler))
        .route("/health", get(health_handler))
        // Compiled client with SPA fallback; assumes `web/dist` built via Trunk
        .fallback_service(
            ServeDir::new(dist_dir).fallback(ServeFile::new(dist_dir.join("index.html"))),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn words_handler(State(state): State<AppState>) -> Result<Json<WordsResponse>, AppError> {
    let words = state.supplier.lock().await.fetch_words()?;
    debug!("Serving {} words", words.len());
    Ok(Json(words))
}

async fn health_handler() -> &'static str {
    "ok"
}
