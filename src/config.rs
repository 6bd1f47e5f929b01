use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use config::{Config, Environment};
use serde::Deserialize;
use std::net::SocketAddr;

const IS_DEVELOPMENT: bool = cfg!(debug_assertions);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub cors_permissive: bool,

    #[serde(default)]
    pub otel_enabled: bool,

    #[serde(default)]
    pub listen_address: Option<SocketAddr>,

    #[serde(default)]
    pub http_ssl: Option<HttpSslConfig>,
}

impl EnvironmentConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_environment(Environment::default())
    }

    pub fn from_environment(environment: Environment) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(environment.separator("__").try_parsing(true))
            .build()
            .context("Failed to build settings")?
            .try_deserialize()
            .context("Invalid environment variables")
    }

    pub fn listener_address(&self) -> SocketAddr {
        self.listen_address.unwrap_or_else(|| {
            let default_address: ([u8; 4], u16) = if IS_DEVELOPMENT {
                ([127, 0, 0, 1], 3000)
            } else {
                ([0, 0, 0, 0], 8080)
            };

            SocketAddr::from(default_address)
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSslConfig {
    pub key: String,
    pub cert: String,
}

impl HttpSslConfig {
    pub async fn to_rustls_config(&self) -> anyhow::Result<RustlsConfig> {
        let cert = BASE64_STANDARD
            .decode(&self.cert)
            .context("Failed to decode SSL certificate")?;
        let key = BASE64_STANDARD
            .decode(&self.key)
            .context("Failed to decode SSL key")?;

        RustlsConfig::from_pem(cert, key)
            .await
            .context("Failed to load SSL certificate and key")
    }
}
