//! Notes Service binary.
//!
//! Default: http://127.0.0.1:9110/

use notes_service::{AppState, Config, Database};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    log::info!("[NOTES] Opening note store at {}", config.database_url);
    let db = match Database::new(&config.database_url) {
        Ok(db) => db,
        Err(e) => {
            log::error!("[NOTES] {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(db));
    let app = notes_service::app(state);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("[NOTES] Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    log::info!("Notes Service listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("[NOTES] Server error: {}", e);
        std::process::exit(1);
    }
}
