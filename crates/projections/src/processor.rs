//! Projection processor for feeding log events to projections.

use event_store::{EventEnvelope, EventStore};
use futures_util::StreamExt;

use crate::error::ProjectionError;
use crate::projection::Projection;
use crate::Result;

/// Delivers events from the log to a set of projections.
///
/// Supports catch-up (replay the full log into projections that are
/// behind), single-event delivery for newly appended events, and rebuild
/// (reset everything and replay from scratch). Malformed events are
/// logged and skipped, never applied; every other error aborts delivery.
pub struct ProjectionProcessor<S: EventStore> {
    store: S,
    projections: Vec<Box<dyn Projection>>,
}

impl<S: EventStore> ProjectionProcessor<S> {
    /// Creates a new processor reading from the given log.
    pub fn new(store: S) -> Self {
        Self {
            store,
            projections: Vec::new(),
        }
    }

    /// Registers a projection with this processor.
    pub fn register(&mut self, projection: Box<dyn Projection>) {
        self.projections.push(projection);
    }

    /// Returns the number of registered projections.
    pub fn projection_count(&self) -> usize {
        self.projections.len()
    }

    /// Streams the full log and delivers each event to every projection
    /// that has not seen it yet.
    #[tracing::instrument(skip(self))]
    pub async fn run_catch_up(&self) -> Result<()> {
        let mut stream = self.store.stream_all_events().await?;
        let mut event_index: u64 = 0;

        while let Some(result) = stream.next().await {
            let event = result?;
            event_index += 1;

            for projection in &self.projections {
                let pos = projection.position().await;
                if pos.events_processed < event_index {
                    Self::deliver(projection.as_ref(), &event).await?;
                }
            }
        }

        tracing::info!(events_processed = event_index, "catch-up complete");

        Ok(())
    }

    /// Delivers a single event to all registered projections.
    #[tracing::instrument(skip(self, event), fields(event_type = %event.event_type))]
    pub async fn process_event(&self, event: &EventEnvelope) -> Result<()> {
        for projection in &self.projections {
            Self::deliver(projection.as_ref(), event).await?;
        }
        Ok(())
    }

    /// Resets all projections and replays the full log.
    #[tracing::instrument(skip(self))]
    pub async fn rebuild_all(&self) -> Result<()> {
        for projection in &self.projections {
            projection.reset().await?;
        }
        self.run_catch_up().await
    }

    async fn deliver(projection: &dyn Projection, event: &EventEnvelope) -> Result<()> {
        match projection.handle(event).await {
            Ok(()) => {
                metrics::counter!("projections_events_processed").increment(1);
                Ok(())
            }
            Err(ProjectionError::MalformedEvent { event_type, source }) => {
                tracing::warn!(
                    projection = projection.name(),
                    %event_type,
                    error = %source,
                    "skipping malformed event"
                );
                metrics::counter!("projections_malformed_events_skipped").increment(1);
                Ok(())
            }
            Err(other) => Err(other),
        }
    }
}
