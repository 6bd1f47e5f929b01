pub mod app;
pub mod config;
mod routes;
pub mod telemetry;

pub use routes::version::GREETING;
