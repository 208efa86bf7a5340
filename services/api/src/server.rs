use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hiring_guru::clients::{HttpAiBackend, Judge0Client};
use hiring_guru::config::AppConfig;
use hiring_guru::error::AppError;
use hiring_guru::telemetry;
use tracing::{info, warn};

use crate::cli::ServeArgs;
use crate::infra::{AppState, Stores};
use crate::routes::api_router;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if config.session.callback_secret.is_empty() {
        warn!("OAUTH_CALLBACK_SECRET is unset; every login callback will be refused");
    }

    let stores = Stores::seeded()?;
    let judge = Arc::new(Judge0Client::new(config.judge.clone())?);
    let ai = Arc::new(HttpAiBackend::new(config.ai.clone())?);

    let app = api_router(&stores, judge, ai, config.session.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, judge = %config.judge.base_url, "hiring guru api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
