use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use hello_version::config::EnvironmentConfig;
use hello_version::{app, telemetry};
use std::net::SocketAddr;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cfg = EnvironmentConfig::load().expect("Invalid environment variables");

    if let Err(error) = telemetry::setup(cfg.otel_enabled) {
        tracing::error!("Failed to set up telemetry: {error:?}");
    }

    let rustls_config = match &cfg.http_ssl {
        None => None,
        Some(s) => {
            rustls::crypto::aws_lc_rs::default_provider()
                .install_default()
                .expect("Failed to install rustls crypto provider");
            Some(s.to_rustls_config().await.expect("Valid SSL Config"))
        }
    };

    let listener_address = cfg.listener_address();
    let app = app::create_app(cfg);

    if let Err(error) = serve(app, listener_address, rustls_config).await {
        tracing::error!("Server exited with an error: {error:?}");
    }
}

async fn serve(
    app: Router,
    address: SocketAddr,
    rustls_config: Option<RustlsConfig>,
) -> std::io::Result<()> {
    let service = app.into_make_service();
    let Some(rustls_config) = rustls_config else {
        tracing::info!("🚀 Listening on http://{address}");
        return axum_server::bind(address).serve(service).await;
    };

    tracing::info!("🚀 Listening on https://{address}");
    axum_server::bind_rustls(address, rustls_config)
        .serve(service)
        .await
}
