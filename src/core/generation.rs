//! Delayed, cancellable blueprint generation.
//!
//! Every request runs as its own tokio task that sleeps for the configured
//! delay and then reports a [`GenerationCompleted`] on an unbounded channel.
//! Each task owns a [`CancellationToken`]; cancelling it before the delay
//! elapses means nothing is ever sent for that request.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::domain::{Blueprint, ScenarioFields};

use super::generator::BlueprintGenerator;

/// Monotonic identifier of a generation request within one view.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub id: RequestId,
    pub fields: ScenarioFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationCompleted {
    pub id: RequestId,
    pub blueprint: Blueprint,
}

/// Spawns generation tasks and tracks their cancellation tokens.
pub struct GenerationService {
    handle: Handle,
    generator: Arc<dyn BlueprintGenerator>,
    delay: Duration,
    in_flight: HashMap<RequestId, CancellationToken>,
    completions: UnboundedSender<GenerationCompleted>,
}

impl GenerationService {
    /// Creates the service and the receiving end of its completion channel.
    pub fn new(
        handle: Handle,
        generator: Arc<dyn BlueprintGenerator>,
        delay: Duration,
    ) -> (Self, UnboundedReceiver<GenerationCompleted>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = Self {
            handle,
            generator,
            delay,
            in_flight: HashMap::new(),
            completions: tx,
        };
        (service, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn start(&mut self, request: GenerationRequest) {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let generator = Arc::clone(&self.generator);
        let completions = self.completions.clone();
        let delay = self.delay;
        let id = request.id;

        tracing::info!(request_id = id, delay_ms = delay.as_millis() as u64, "generation started");
        self.in_flight.insert(id, token);

        self.handle.spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {
                    tracing::debug!(request_id = id, "generation task cancelled before completion");
                }
                _ = tokio::time::sleep(delay) => {
                    let blueprint = generator.generate(&request.fields);
                    if completions.send(GenerationCompleted { id, blueprint }).is_err() {
                        tracing::debug!(request_id = id, "completion receiver dropped");
                    }
                }
            }
        });
    }

    /// Cancels a request; returns `false` when it was unknown or already finished.
    pub fn cancel(&mut self, id: RequestId) -> bool {
        match self.in_flight.remove(&id) {
            Some(token) => {
                token.cancel();
                tracing::info!(request_id = id, "generation cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (id, token) in self.in_flight.drain() {
            token.cancel();
            tracing::debug!(request_id = id, "generation cancelled on shutdown");
        }
    }

    /// Forgets the token of a request whose completion has been received.
    pub fn acknowledge(&mut self, id: RequestId) {
        self.in_flight.remove(&id);
    }
}

impl Drop for GenerationService {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
