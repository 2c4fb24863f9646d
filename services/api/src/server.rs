use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryContentStore, InMemoryNotificationRepository, InMemoryProfileRepository,
    InMemoryReportRepository, InMemoryVerificationRepository,
};
use crate::routes::with_workflow_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use clinicase::config::AppConfig;
use clinicase::error::AppError;
use clinicase::notifications::NotificationDispatcher;
use clinicase::telemetry;
use clinicase::workflows::moderation::ModerationWorkflow;
use clinicase::workflows::verification::VerificationWorkflow;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(config.environment, &config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let requests = Arc::new(InMemoryVerificationRepository::default());
    let profiles = Arc::new(InMemoryProfileRepository::default());
    let reports = Arc::new(InMemoryReportRepository::default());
    let content = Arc::new(InMemoryContentStore::default());
    let notifications = Arc::new(InMemoryNotificationRepository::default());

    let dispatcher = Arc::new(NotificationDispatcher::new(notifications));
    let verification = Arc::new(VerificationWorkflow::new(
        requests,
        profiles,
        dispatcher.clone(),
    ));
    let moderation = Arc::new(ModerationWorkflow::new(reports, content, dispatcher.clone()));

    let app = with_workflow_routes(verification, moderation, dispatcher)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        "moderation and verification workflow service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
