//! Server assembly: both endpoints on one address.

use crate::{ApiKeyInterceptor, HospitalEndpoint, PatientEndpoint};
use api_shared::pb::hospital_service_endpoint_server::HospitalServiceEndpointServer;
use api_shared::pb::patient_service_endpoint_server::PatientServiceEndpointServer;
use api_shared::FILE_DESCRIPTOR_SET;
use hospital_core::{CoreConfig, HospitalService, PatientService, Store};
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;

/// Transport settings resolved at startup.
#[derive(Clone, Debug)]
pub struct GrpcConfig {
    pub addr: SocketAddr,
    /// When set, every call must carry a matching `x-api-key`.
    pub api_key: Option<String>,
    pub enable_reflection: bool,
}

/// Connect to the record store, migrate it and serve until Ctrl-C.
///
/// # Errors
/// Returns an error if:
/// - the store cannot be opened or migrated,
/// - the reflection service cannot be built, or
/// - the gRPC server fails to bind or while running.
pub async fn serve(grpc: GrpcConfig, cfg: Arc<CoreConfig>) -> anyhow::Result<()> {
    let store = Store::connect(&cfg).await?;

    if grpc.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("API_KEY not set, gRPC calls are unauthenticated");
    }
    let interceptor = ApiKeyInterceptor::new(grpc.api_key);

    let hospitals = HospitalEndpoint::new(HospitalService::new(cfg.clone(), store.clone()));
    let patients = PatientEndpoint::new(PatientService::new(cfg, store.clone()));

    let mut router = Server::builder()
        .add_service(HospitalServiceEndpointServer::with_interceptor(
            hospitals,
            interceptor.clone(),
        ))
        .add_service(PatientServiceEndpointServer::with_interceptor(
            patients,
            interceptor,
        ));

    if grpc.enable_reflection {
        let reflection_service = tonic_reflection::server::Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()?;
        router = router.add_service(reflection_service);
        tracing::info!("gRPC server reflection enabled");
    } else {
        tracing::info!("gRPC server reflection disabled");
    }

    tracing::info!("++ Serving hospital registry gRPC on {}", grpc.addr);
    router
        .serve_with_shutdown(grpc.addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    store.close().await;
    tracing::info!("-- hospital registry gRPC stopped");
    Ok(())
}
