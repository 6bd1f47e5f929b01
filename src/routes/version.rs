use axum::http::StatusCode;

pub const GREETING: &str = concat!("hello from version ", env!("CARGO_PKG_VERSION"));

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = OK, description = "Service greeting", content_type = "text/plain", body = String)
    )
)]
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, GREETING)
}

#[utoipa::path(
    get,
    path = "/version",
    responses(
        (status = OK, description = "Service greeting", content_type = "text/plain", body = String)
    )
)]
pub async fn version() -> (StatusCode, &'static str) {
    (StatusCode::OK, GREETING)
}
