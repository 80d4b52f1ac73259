use crate::shared::start_stop::StartStop;
use anyhow::Context as _;
use calendar_infra::MqConfig;
use lapin::options::{BasicPublishOptions, ExchangeDeclareOptions};
use lapin::types::{FieldTable, ShortString};
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Publishes serialized alerts from the scheduler's hand-off channel to a
/// durable direct exchange. Deliveries are transient with an
/// `application/json` content type; a failed publish is logged and the
/// message dropped, there is no retry queue.
pub struct AlertProducer {
    config: MqConfig,
    messages: Option<mpsc::Receiver<String>>,
    connection: Option<Connection>,
    handle: Option<JoinHandle<()>>,
    cancel: CancellationToken,
}

impl AlertProducer {
    pub fn new(config: MqConfig, messages: mpsc::Receiver<String>) -> Self {
        Self {
            config,
            messages: Some(messages),
            connection: None,
            handle: None,
            cancel: CancellationToken::new(),
        }
    }

    async fn publish(
        channel: Channel,
        exchange: String,
        routing_key: String,
        mut messages: mpsc::Receiver<String>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                msg = messages.recv() => {
                    let Some(msg) = msg else {
                        info!("alert channel closed, publisher exiting");
                        return;
                    };
                    info!("publishing {}B body ({:?})", msg.len(), msg);
                    let properties = BasicProperties::default()
                        .with_content_type(ShortString::from("application/json"))
                        .with_delivery_mode(1);
                    if let Err(e) = channel
                        .basic_publish(
                            &exchange,
                            &routing_key,
                            BasicPublishOptions::default(),
                            msg.as_bytes(),
                            properties,
                        )
                        .await
                    {
                        error!("exchange publish: {}", e);
                    }
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl StartStop for AlertProducer {
    async fn start(&mut self) -> anyhow::Result<()> {
        if self.handle.is_some() {
            return Ok(());
        }
        let messages = self
            .messages
            .take()
            .context("alert producer was already stopped")?;

        info!("dialing {:?}", self.config.uri);
        let connection = Connection::connect(&self.config.uri, ConnectionProperties::default())
            .await
            .context("dial")?;

        info!("got Connection, getting Channel");
        let channel = connection.create_channel().await.context("channel")?;

        info!("got Channel, declaring direct Exchange ({:?})", self.config.exchange);
        channel
            .exchange_declare(
                &self.config.exchange,
                ExchangeKind::Direct,
                ExchangeDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .context("exchange declare")?;

        self.handle = Some(tokio::spawn(Self::publish(
            channel,
            self.config.exchange.clone(),
            self.config.routing_key.clone(),
            messages,
            self.cancel.clone(),
        )));
        self.connection = Some(connection);
        Ok(())
    }

    async fn stop(&mut self, deadline: Duration) -> anyhow::Result<()> {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if tokio::time::timeout(deadline, handle).await.is_err() {
                error!("publisher did not drain within the stop deadline");
            }
        }
        if let Some(connection) = self.connection.take() {
            connection.close(200, "bye").await.context("connection close")?;
        }
        info!("AMQP shutdown OK");
        Ok(())
    }
}
