use anyhow::Context;
use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{LogExporter, MetricExporter, SpanExporter};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

struct OtlpProviders {
    tracer: SdkTracerProvider,
    logger: SdkLoggerProvider,
    meter: SdkMeterProvider,
}

impl OtlpProviders {
    fn build() -> anyhow::Result<Self> {
        let resource = Resource::builder().with_service_name(SERVICE_NAME).build();

        let span_exporter = SpanExporter::builder()
            .with_tonic()
            .build()
            .context("Failed to create span exporter")?;
        let log_exporter = LogExporter::builder()
            .with_tonic()
            .build()
            .context("Failed to create log exporter")?;
        let metric_exporter = MetricExporter::builder()
            .with_tonic()
            .build()
            .context("Failed to create metric exporter")?;

        Ok(Self {
            tracer: SdkTracerProvider::builder()
                .with_resource(resource.clone())
                .with_batch_exporter(span_exporter)
                .build(),
            logger: SdkLoggerProvider::builder()
                .with_resource(resource.clone())
                .with_batch_exporter(log_exporter)
                .build(),
            meter: SdkMeterProvider::builder()
                .with_resource(resource)
                .with_periodic_exporter(metric_exporter)
                .build(),
        })
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn setup(otlp_enabled: bool) -> anyhow::Result<()> {
    init(otlp_enabled, OtlpProviders::build)
}

fn init(
    otlp_enabled: bool,
    build_providers: impl FnOnce() -> anyhow::Result<OtlpProviders>,
) -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_current_span(!otlp_enabled)
        .with_span_list(false)
        .with_target(false)
        .with_filter(default_filter());

    if !otlp_enabled {
        tracing_subscriber::registry().with(fmt_layer).try_init()?;
        return Ok(());
    }

    // Keep stdout logging when the exporters cannot be built.
    let providers = match build_providers() {
        Ok(providers) => providers,
        Err(error) => {
            tracing_subscriber::registry().with(fmt_layer).try_init()?;
            return Err(error);
        }
    };
    global::set_meter_provider(providers.meter.clone());
    global::set_tracer_provider(providers.tracer.clone());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(OpenTelemetryTracingBridge::new(&providers.logger).with_filter(default_filter()))
        .with(
            tracing_opentelemetry::OpenTelemetryLayer::new(providers.tracer.tracer("main"))
                .with_filter(default_filter()),
        )
        .with(tracing_opentelemetry::MetricsLayer::new(providers.meter).with_filter(default_filter()))
        .try_init()?;

    Ok(())
}
