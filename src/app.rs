use crate::config::EnvironmentConfig;
use crate::routes;
use axum::Router;
use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
use opentelemetry::global::set_text_map_propagator;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use tower_http::cors::CorsLayer;
use utoipa::openapi::InfoBuilder;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

pub fn create_app(config: EnvironmentConfig) -> Router<()> {
    let (router, openapi) = OpenApiRouter::with_openapi(openapi())
        .routes(routes!(routes::version::root))
        .routes(routes!(routes::version::version))
        .split_for_parts();

    let mut app = router.merge(SwaggerUi::new("/api/docs").url("/api.json", openapi));
    if config.otel_enabled {
        set_text_map_propagator(TraceContextPropagator::new());
        app = app
            .layer(OtelInResponseLayer::default())
            .layer(OtelAxumLayer::default());
    }

    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

fn openapi() -> utoipa::openapi::OpenApi {
    let openapi_info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION").to_string()))
        .build();

    utoipa::openapi::OpenApi::new(openapi_info, utoipa::openapi::Paths::new())
}
