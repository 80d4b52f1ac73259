mod telemetry;

use calendar_app::{AlertConsumer, StartStop};
use calendar_infra::Config;
use std::time::Duration;
use telemetry::{get_subscriber, init_subscriber};
use tracing::{error, info, warn};

const STOP_DEADLINE: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("calendar_sender".into(), "info".into());
    init_subscriber(subscriber);

    let config = Config::new();
    let mut consumer = AlertConsumer::new(config.mq, |alert| {
        warn!("!!! ATTENTION !!! you have a calendar alert: {}", alert);
    });
    consumer.start().await?;

    info!("sender is running...");
    shutdown_signal().await;

    if let Err(e) = consumer.stop(STOP_DEADLINE).await {
        error!("failed to stop consumer: {:?}", e);
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
