use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use coursehub_config::ServerConfig;
use opentelemetry::{KeyValue, global, trace::TraceError};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    runtime,
    trace::{RandomIdGenerator, Sampler, Tracer},
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use std::time::Instant;
use tracing::{Instrument, Level, debug, error, info, info_span, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level and message for the event closing a request with `status`.
fn completion(status: StatusCode) -> (Level, &'static str) {
    if status.is_server_error() {
        (Level::ERROR, "Server error")
    } else if status.is_client_error() {
        (Level::WARN, "Client error")
    } else {
        (Level::INFO, "Request completed")
    }
}

/// Wraps each request in a `request` span carrying its id, method and route,
/// then logs one completion event at a level chosen from the status.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let span = info_span!(
        "request",
        request_id = %uuid::Uuid::new_v4(),
        method = %req.method(),
        path = %path,
    );

    async move {
        debug!("Incoming request");
        let response = next.run(req).await;

        let status = response.status().as_u16();
        let latency_ms = start.elapsed().as_millis() as u64;
        macro_rules! completed {
            ($event:ident, $message:expr) => {
                $event!(status, latency_ms, "{}", $message)
            };
        }
        let (level, message) = completion(response.status());
        if level == Level::ERROR {
            completed!(error, message);
        } else if level == Level::WARN {
            completed!(warn, message);
        } else {
            completed!(info, message);
        }

        response
    }
    .instrument(span)
    .await
}

fn init_tracer(otlp_endpoint: String) -> Result<Tracer, TraceError> {
    info!(endpoint = %otlp_endpoint, "Initializing OpenTelemetry tracer");

    global::set_text_map_propagator(TraceContextPropagator::new());

    let environment =
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let resource = Resource::new([
        KeyValue::new(SERVICE_NAME, env!("CARGO_PKG_NAME")),
        KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
        KeyValue::new("environment", environment),
    ]);

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(otlp_endpoint),
        )
        .with_trace_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(resource),
        )
        .install_batch(runtime::Tokio)
}

/// `RUST_LOG` when set, otherwise info for this crate and quieter deps.
fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,tower_http=warn,hyper=info,tonic=info,sqlx=warn",
            env!("CARGO_CRATE_NAME")
        ))
    })
}

/// The OTLP tracer, or `None` when observability is off or the exporter
/// cannot be built.
fn otlp_tracer(config: &ServerConfig) -> Option<Tracer> {
    if !config.observability_enabled {
        return None;
    }
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());
    init_tracer(endpoint)
        .inspect_err(|e| eprintln!("OpenTelemetry disabled, exporter failed to start: {e}"))
        .ok()
}

/// Installs the global subscriber: compact console output, a daily error log,
/// a daily JSON log and, when enabled and reachable, an OTLP exporter.
pub fn init_tracing(config: &ServerConfig) -> std::io::Result<()> {
    let log_dir = config.log_dir.as_str();
    std::fs::create_dir_all(log_dir)?;

    let console = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter());

    let errors = fmt::layer()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, log_dir, "coursehub.log"))
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json = fmt::layer()
        .json()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, log_dir, "coursehub.json"))
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    let tracer = otlp_tracer(config);
    let exporting = tracer.is_some();

    tracing_subscriber::registry()
        .with(console)
        .with(errors)
        .with(json)
        .with(tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer)))
        .init();

    if exporting {
        info!("Tracing initialized with OpenTelemetry and file logging");
    } else {
        warn!("Tracing initialized without OpenTelemetry (file logging only)");
    }
    Ok(())
}

pub async fn shutdown_tracer() {
    info!("Shutting down OpenTelemetry tracer...");
    global::shutdown_tracer_provider();
}
