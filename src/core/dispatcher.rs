//! Dispatcher: drains the event buffer into department queues at a fixed rate.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::error::SendTimeoutError;

use crate::core::{DispatchError, Event, EventBuffer, EventLog, Routes};

/// Result of one dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Buffer was empty.
    Idle,
    /// Event delivered to its department queue.
    Routed(Event),
    /// Event dropped because it could not be delivered.
    Dropped(Event, DispatchError),
}

/// Moves the most urgent pending event to its department once per period.
#[derive(Debug)]
pub struct Dispatcher {
    buffer: Arc<EventBuffer>,
    routes: Routes,
    log: Arc<EventLog>,
    period: Duration,
    route_timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher.
    #[must_use]
    pub const fn new(
        buffer: Arc<EventBuffer>,
        routes: Routes,
        log: Arc<EventLog>,
        period: Duration,
        route_timeout: Duration,
    ) -> Self {
        Self {
            buffer,
            routes,
            log,
            period,
            route_timeout,
        }
    }

    /// Run forever: one dispatch attempt, then a fixed sleep, whether or not an
    /// event was found.
    pub async fn run(self) {
        loop {
            let outcome = self.dispatch_once().await;
            tracing::trace!(?outcome, "dispatch cycle");
            tokio::time::sleep(self.period).await;
        }
    }

    /// Take the highest-priority event and route it. A queue that stays full
    /// for the routing bound costs the event; it is not retried.
    pub async fn dispatch_once(&self) -> DispatchOutcome {
        let Some(event) = self.buffer.take_highest() else {
            return DispatchOutcome::Idle;
        };

        match self.route(event).await {
            Ok(()) => {
                self.log.append(format!(
                    "Dispatcher sent event to {} (priority {})",
                    event.department, event.priority
                ));
                DispatchOutcome::Routed(event)
            }
            Err(e @ DispatchError::RoutingTimeout { .. }) => {
                self.log.warn(format!(
                    "Warning: {} queue full. Dispatcher dropped event.",
                    event.department
                ));
                DispatchOutcome::Dropped(event, e)
            }
            Err(e) => {
                self.log.error(format!("Dispatcher dropped event {}: {e}", event.id));
                DispatchOutcome::Dropped(event, e)
            }
        }
    }

    async fn route(&self, event: Event) -> Result<(), DispatchError> {
        let department = event.department;
        self.routes
            .sender(department)
            .send_timeout(event, self.route_timeout)
            .await
            .map_err(|e| match e {
                SendTimeoutError::Timeout(_) => DispatchError::RoutingTimeout { department },
                SendTimeoutError::Closed(_) => DispatchError::QueueClosed { department },
            })
    }
}
