use anyhow::Result;
use std::time::Duration;

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter, MeterProvider as _},
    trace::TracerProvider as _,
    KeyValue,
};
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    metrics::{PeriodicReader, SdkMeterProvider},
    trace::SdkTracerProvider,
    Resource,
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

use crate::amm::types::{Reserves, U256};

pub const ENV_COMMIT_SHA: &str = "AMM_COMMIT_SHA";

pub struct Telemetry {
    pub tracer_provider: SdkTracerProvider,
    pub meter_provider: SdkMeterProvider,
    pub meter: Meter,
    pub swap_latency_ms: Histogram<f64>,
    pub invariant_error_rel: Histogram<f64>,
    pub liquidity_ops: Counter<u64>,
}

impl Telemetry {
    /// Registra um swap: latência e `Δk/k` medido nas reservas antes/depois.
    pub fn record_swap(&self, direction: &'static str, latency_ms: f64, before: Reserves, after: Reserves) {
        let attrs = [KeyValue::new("op", "swap"), KeyValue::new("direction", direction)];
        self.swap_latency_ms.record(latency_ms, &attrs);
        self.invariant_error_rel
            .record(relative_k_change(before.product(), after.product()), &attrs);
    }

    /// Conta um add/remove de liquidez.
    pub fn record_liquidity(&self, op: &'static str) {
        self.liquidity_ops.add(1, &[KeyValue::new("op", op)]);
    }

    pub fn shutdown(&self) {
        let _ = self.meter_provider.force_flush();
        let _ = self.tracer_provider.shutdown();
    }
}

/// `(k1 - k0) / k0` com 12 casas, sem passar U256 inteiro para f64.
pub fn relative_k_change(k0: U256, k1: U256) -> f64 {
    if k0.is_zero() {
        return 0.0;
    }
    const SCALE: u64 = 1_000_000_000_000;
    let (diff, sign) = if k1 >= k0 { (k1 - k0, 1.0) } else { (k0 - k1, -1.0) };
    let scaled = diff.saturating_mul(U256::from(SCALE)) / k0;
    // satura em vez de truncar os bits altos
    let scaled = if scaled > U256::from(u128::MAX) { u128::MAX } else { scaled.low_u128() };
    sign * (scaled as f64) / SCALE as f64
}

pub fn init(service_name: &str) -> Result<Telemetry> {
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4318".to_string());

    let commit = std::env::var(ENV_COMMIT_SHA).unwrap_or_else(|_| "unknown".into());

    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", service_name.to_string()),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new("git.commit.sha", commit),
        ])
        .build();

    // ---- Traces (OTLP/HTTP) ----
    let span_exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(format!("{}/v1/traces", endpoint))
        .build()?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(span_exporter)
        .build();

    let tracer = tracer_provider.tracer("exchange_core");

    // ---- Métricas (OTLP/HTTP) ----
    let metric_exporter = MetricExporter::builder()
        .with_http()
        .with_endpoint(format!("{}/v1/metrics", endpoint))
        .build()?;

    let reader = PeriodicReader::builder(metric_exporter)
        .with_interval(Duration::from_secs(10))
        .build();

    let meter_provider = SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build();

    // Globais
    global::set_tracer_provider(tracer_provider.clone());
    global::set_meter_provider(meter_provider.clone());

    // tracing -> OTel
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let subscriber = Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt_layer)
        .with(otel_layer);
    let _ = tracing::subscriber::set_global_default(subscriber);

    let meter = meter_provider.meter("exchange_core");
    let swap_latency_ms = meter
        .f64_histogram("swap_latency_ms")
        .with_unit("ms")
        .with_description("Latency of pool swaps in ms")
        .build();
    let invariant_error_rel = meter
        .f64_histogram("invariant_error_rel")
        .with_unit("1")
        .with_description("Relative product change (k1-k0)/k0 per swap")
        .build();
    let liquidity_ops = meter
        .u64_counter("liquidity_ops")
        .with_description("Add/remove liquidity operations")
        .build();

    Ok(Telemetry { tracer_provider, meter_provider, meter, swap_latency_ms, invariant_error_rel, liquidity_ops })
}

/// Cria um `Span` INFO com nome **estático** (exigência do tracing) e
/// coloca o nome dinâmico em `span_name`. Inclui `git_commit_sha`.
pub fn make_info_span(name: &str, op_id: u32, component: &str) -> tracing::Span {
    let commit = std::env::var(ENV_COMMIT_SHA).unwrap_or_else(|_| "unknown".into());
    tracing::span!(
        target: "exchange_core",
        Level::INFO,
        "op",
        git_commit_sha = %commit,
        span_name = %name,
        op_id = op_id,
        component = component
    )
}
