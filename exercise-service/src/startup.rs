use crate::config::{ExerciseConfig, StoreBackend};
use crate::handlers;
use crate::middleware::TokenVerifier;
use crate::services::{ExerciseApiClient, ExerciseStore, InMemoryExerciseStore, MongoDb};
use axum::{
    extract::FromRef,
    http::Request,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware,
};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

#[derive(Clone)]
pub struct AppState {
    pub config: ExerciseConfig,
    pub store: Arc<dyn ExerciseStore>,
    pub exercise_api: ExerciseApiClient,
    pub tokens: TokenVerifier,
}

impl FromRef<AppState> for TokenVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

pub struct Application {
    port: u16,
    server: ServerFuture,
    state: AppState,
}

impl Application {
    pub async fn build(config: ExerciseConfig) -> Result<Self, AppError> {
        let store = build_store(&config).await?;

        let state = AppState {
            exercise_api: ExerciseApiClient::new(config.exercise_api.clone()),
            tokens: TokenVerifier::new(&config.auth.jwt_secret),
            config: config.clone(),
            store,
        };

        let app = router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(server.into_future()),
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn build_store(config: &ExerciseConfig) -> Result<Arc<dyn ExerciseStore>, AppError> {
    match config.store.backend {
        StoreBackend::MongoDb => {
            let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database).await?;
            db.initialize_indexes().await?;
            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory exercise store; records are lost on restart");
            Ok(Arc::new(InMemoryExerciseStore::new()))
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/exercises", post(handlers::create_exercise))
        .route("/exercises/search", post(handlers::search_exercises))
        // One template serves the name lookup (GET) and the id-keyed mutations.
        .route(
            "/exercises/:id",
            get(handlers::lookup_exercise)
                .patch(handlers::update_exercise)
                .delete(handlers::delete_exercise),
        )
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = Empty,
                    user_id = Empty,
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
