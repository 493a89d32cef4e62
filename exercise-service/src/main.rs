use exercise_service::config::ExerciseConfig;
use exercise_service::services::init_metrics;
use exercise_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Recorder must exist before any metric is emitted.
    init_metrics();

    let config = ExerciseConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "exercise-service",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!(port = app.port(), "exercise-service started");

    app.run_until_stopped().await?;

    tracing::info!("exercise-service stopped");
    Ok(())
}
