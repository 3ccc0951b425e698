use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_grpc::GrpcConfig;
use hospital_core::config::{
    association_policy_from_env_values, bool_from_env_value, database_url_from_env_value,
    max_connections_from_env_value,
};
use hospital_core::CoreConfig;

/// Main entry point for the hospital registry
///
/// Serves the hospital and patient gRPC endpoints on one address
/// (default 0.0.0.0:50051, configurable via HOSPITAL_GRPC_ADDR).
///
/// # Environment Variables
/// - `HOSPITAL_GRPC_ADDR`: gRPC server address (default: "0.0.0.0:50051")
/// - `HOSPITAL_ENABLE_REFLECTION`: expose gRPC reflection (default: false)
/// - `API_KEY`: when set, required in the `x-api-key` metadata of every call
/// - `DATABASE_URL`: SQLite URL (default: "sqlite://hospital.db")
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
/// - `ALLOW_DUPLICATE_REGISTRATIONS`: keep repeated registrations as extra edges (default: true)
/// - `CASCADE_ASSOCIATIONS_ON_DELETE`: drop association rows with their entity (default: false)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, store setup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hospital=info".parse()?)
                .add_directive("api_grpc=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let grpc = GrpcConfig {
        addr: std::env::var("HOSPITAL_GRPC_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:50051".into())
            .parse::<SocketAddr>()?,
        api_key: std::env::var("API_KEY").ok().filter(|k| !k.is_empty()),
        enable_reflection: bool_from_env_value(
            "HOSPITAL_ENABLE_REFLECTION",
            std::env::var("HOSPITAL_ENABLE_REFLECTION").ok(),
            false,
        )?,
    };

    let cfg = Arc::new(CoreConfig::new(
        database_url_from_env_value(std::env::var("DATABASE_URL").ok()),
        max_connections_from_env_value(std::env::var("DATABASE_MAX_CONNECTIONS").ok())?,
        association_policy_from_env_values(
            std::env::var("ALLOW_DUPLICATE_REGISTRATIONS").ok(),
            std::env::var("CASCADE_ASSOCIATIONS_ON_DELETE").ok(),
        )?,
    )?);

    tracing::info!(
        policy = ?cfg.association_policy(),
        "++ Starting hospital registry on {}",
        grpc.addr
    );

    api_grpc::serve(grpc, cfg).await
}
