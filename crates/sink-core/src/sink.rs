//! The batch-drain-map-commit processing step.

use crate::{config::SinkConfig, counter::SinkCounter, error::SinkError, render::render_batch};
use connectors::{channel::EventChannel, destination::EventDestination, error::DbError};
use model::records::{event::Event, insert::InsertRow};
use tracing::{debug, error, info, warn};

/// Drain status reported to the scheduler after each processing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStatus {
    /// Work was delivered; call again without delay.
    Ready,
    /// The channel had nothing to drain; pause before calling again.
    Backoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    Idle,
    Running,
    Stopped,
}

/// Drains bounded batches of events from the channel and writes them to the
/// destination table under two coordinated transactions.
///
/// One instance owns its channel and destination exclusively; `process` is
/// invoked serially by an external scheduler (`&mut self` enforces this).
pub struct BatchSink<C> {
    name: String,
    channel: C,
    destination: Box<dyn EventDestination>,
    config: SinkConfig,
    counter: SinkCounter,
    state: SinkState,
}

impl<C: EventChannel> BatchSink<C> {
    pub fn new(
        name: &str,
        config: SinkConfig,
        channel: C,
        destination: Box<dyn EventDestination>,
    ) -> Self {
        BatchSink {
            name: name.to_string(),
            channel,
            destination,
            config,
            counter: SinkCounter::new(),
            state: SinkState::Idle,
        }
    }

    /// Connects the destination named by `config` and builds the sink.
    pub async fn connect(name: &str, config: SinkConfig, channel: C) -> Result<Self, SinkError> {
        let destination = connectors::destination::connect(
            config.driver,
            &config.connection_url,
            config.user.as_deref(),
            config.password.as_deref(),
        )
        .await?;
        Ok(Self::new(name, config, channel, destination))
    }

    pub fn start(&mut self) {
        if self.state == SinkState::Idle {
            self.state = SinkState::Running;
            info!(sink = %self.name, table = %self.config.table, "sink started");
        }
    }

    pub fn stop(&mut self) {
        if self.state == SinkState::Running {
            self.state = SinkState::Stopped;
            info!(
                sink = %self.name,
                counter = ?self.counter.snapshot(),
                "sink stopped"
            );
        }
    }

    pub fn state(&self) -> SinkState {
        self.state
    }

    pub fn counter(&self) -> &SinkCounter {
        &self.counter
    }

    /// Runs one drain→render→write→commit cycle.
    ///
    /// The source transaction is released on every exit path, and the
    /// destination transaction is always resolved before the source one; on
    /// failure both are rolled back and the channel redelivers the same
    /// events next time (at-least-once, duplicates possible on retry).
    pub async fn process(&mut self) -> Result<SinkStatus, SinkError> {
        if self.state != SinkState::Running {
            return Err(SinkError::NotRunning);
        }

        self.channel.begin().await?;
        let outcome = self.step().await;
        if let Err(error) = self.channel.close().await {
            warn!(sink = %self.name, %error, "failed to release channel transaction");
        }
        outcome
    }

    async fn step(&mut self) -> Result<SinkStatus, SinkError> {
        let events = self.drain().await?;

        if events.is_empty() {
            self.counter.increment_batch_empty();
            self.channel.commit().await?;
            return Ok(SinkStatus::Backoff);
        }
        if events.len() < self.config.batch_size {
            self.counter.increment_batch_underflow();
        } else {
            self.counter.increment_batch_complete();
        }

        debug!(sink = %self.name, events = events.len(), "rendering drained batch");
        let batch = render_batch(
            &self.config.table,
            &self.config.mapping,
            &events,
            self.config.body_format,
        );

        match self.deliver(&batch.rows).await {
            Ok(()) => {
                self.channel.commit().await?;
                self.counter.add_drain_success(events.len() as u64);
                info!(
                    sink = %self.name,
                    events = events.len(),
                    table = %self.config.table,
                    "batch delivered"
                );
                Ok(SinkStatus::Ready)
            }
            Err(source) => {
                error!(
                    sink = %self.name,
                    error = %source,
                    events = events.len(),
                    "failed to write batch to destination"
                );
                if let Err(rollback_error) = self.destination.rollback().await {
                    error!(sink = %self.name, error = %rollback_error, "destination rollback failed");
                }
                if let Err(rollback_error) = self.channel.rollback().await {
                    error!(sink = %self.name, error = %rollback_error, "source rollback failed");
                }
                self.counter.increment_delivery_failures();
                Err(SinkError::Delivery {
                    table: self.config.table.clone(),
                    events: events.len(),
                    source,
                })
            }
        }
    }

    /// Non-blocking drain of up to `batch_size` events.
    async fn drain(&mut self) -> Result<Vec<Event>, SinkError> {
        let mut events = Vec::with_capacity(self.config.batch_size);
        while events.len() < self.config.batch_size {
            match self.channel.take().await? {
                Some(event) => events.push(event),
                None => break,
            }
        }
        Ok(events)
    }

    async fn deliver(&mut self, rows: &[InsertRow]) -> Result<(), DbError> {
        self.destination.execute_batch(rows).await?;
        self.destination.commit().await?;
        Ok(())
    }
}
