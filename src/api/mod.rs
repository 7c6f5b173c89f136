pub mod handlers;
pub mod types;

use crate::account::AccountRegistry;
use crate::error::PortalError;
use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct ApiState {
    pub registry: AccountRegistry,
}

/// Auth endpoints plus static files from `static_dir` for every other path.
pub fn build_router(state: ApiState, static_dir: &str) -> Router {
    Router::new()
        .route("/api/auth/signup", post(handlers::handle_signup))
        .route("/api/auth/login", post(handlers::handle_login))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct ApiServer {
    state: ApiState,
    port: u16,
    static_dir: String,
}

impl ApiServer {
    pub fn new(registry: AccountRegistry, port: u16, static_dir: String) -> Self {
        Self {
            state: ApiState { registry },
            port,
            static_dir,
        }
    }

    pub async fn start(self) -> Result<(), PortalError> {
        let app = build_router(self.state, &self.static_dir);
        let bind_addr = format!("0.0.0.0:{}", self.port);

        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| PortalError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        info!("Server is running on http://localhost:{}", self.port);
        info!("Serving static files from '{}'", self.static_dir);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
