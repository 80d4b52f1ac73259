mod telemetry;

use calendar_app::{AlertProducer, AlertScheduler, StartStop};
use calendar_infra::setup_context;
use std::time::Duration;
use telemetry::{get_subscriber, init_subscriber};
use tokio::sync::mpsc;
use tracing::{error, info};

const STOP_DEADLINE: Duration = Duration::from_secs(3);
const ALERT_CHANNEL_CAPACITY: usize = 16;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("calendar_scheduler".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await?;
    let mq_config = context.config.mq.clone();
    let (alerts_tx, alerts_rx) = mpsc::channel(ALERT_CHANNEL_CAPACITY);

    // An unreachable broker is fatal: without a publisher the scheduler
    // has nowhere to send alerts.
    let mut producer = AlertProducer::new(mq_config, alerts_rx);
    producer.start().await?;

    let mut scheduler = AlertScheduler::new(context, alerts_tx);
    scheduler.start().await?;

    info!("scheduler is running...");
    shutdown_signal().await;

    if let Err(e) = scheduler.stop(STOP_DEADLINE).await {
        error!("failed to stop scheduler: {:?}", e);
    }
    if let Err(e) = producer.stop(STOP_DEADLINE).await {
        error!("failed to stop producer: {:?}", e);
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}
