//! Department workers.
//!
//! Each worker loops `WaitEvent -> AcquireResource -> {Dispatch | RequeueAndBackoff}`:
//! it blocks on its inbound queue, acquires a unit (own pool, then lenders under
//! the negotiation lock), and either hands the event to a new handler or puts it
//! back on the tail of its own queue and backs off.
//!
//! Under system-wide saturation the requeue path retries without bound, and
//! the requeue send can block on the worker's own full queue. Both are kept
//! as-is: an event is never dropped by this path.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::MsRange;
use crate::core::{
    Department, Event, EventHandler, EventLog, HandlerContext, HandlerSet, PoolSet, Spawn,
};

/// What a worker did with one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStep {
    /// A handler was spawned. Carries the lender when the unit was borrowed.
    Dispatched {
        /// Lending department, if any.
        borrowed_from: Option<Department>,
    },
    /// No unit anywhere; the event went back on the queue.
    Requeued,
}

/// Shared collaborators handed to every worker.
#[derive(Debug, Clone)]
pub struct WorkerContext<S> {
    /// Department pools and borrow lock.
    pub pools: Arc<PoolSet>,
    /// Operator log.
    pub log: Arc<EventLog>,
    /// Spawned handler tracking.
    pub handlers: HandlerSet,
    /// Runtime used to spawn handlers.
    pub spawner: S,
    /// Simulated service time range.
    pub service_time: MsRange,
    /// Pause after a requeue.
    pub backoff: Duration,
}

/// Consumer of one department's inbound queue.
#[derive(Debug)]
pub struct DepartmentWorker<S> {
    department: Department,
    inbox: mpsc::Receiver<Event>,
    requeue: mpsc::Sender<Event>,
    ctx: WorkerContext<S>,
}

impl<S: Spawn> DepartmentWorker<S> {
    /// Create a worker. `requeue` must feed the same queue as `inbox`.
    #[must_use]
    pub const fn new(
        department: Department,
        inbox: mpsc::Receiver<Event>,
        requeue: mpsc::Sender<Event>,
        ctx: WorkerContext<S>,
    ) -> Self {
        Self {
            department,
            inbox,
            requeue,
            ctx,
        }
    }

    /// Department served.
    #[must_use]
    pub const fn department(&self) -> Department {
        self.department
    }

    /// Serve the inbound queue until the task is aborted.
    ///
    /// The worker holds its own requeue sender, so the queue never closes
    /// underneath it.
    pub async fn run(mut self) {
        while let Some(event) = self.inbox.recv().await {
            self.process(event).await;
        }
    }

    /// Receive the next event, waiting indefinitely.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.inbox.recv().await
    }

    /// Acquire a unit for `event` and hand it off, or requeue and back off.
    ///
    /// Handoff never waits for the handler. The requeue send waits as long as
    /// it takes for space on the queue.
    pub async fn process(&self, event: Event) -> WorkerStep {
        let dept = self.department;
        let ctx = &self.ctx;

        if let Some(grant) = ctx.pools.acquire_for(dept) {
            let borrowed_from = grant.lender();
            if let Some(lender) = borrowed_from {
                ctx.log.append(format!("{dept} borrowed resource from {lender}"));
            }
            ctx.log.append(format!(
                "{dept} handling event (priority {}){}",
                event.priority,
                if borrowed_from.is_some() { " [borrowed]" } else { "" }
            ));

            let handler_ctx =
                HandlerContext::new(event, dept, Arc::clone(ctx.pools.pool(dept)), grant);
            ctx.handlers.spawn(
                &ctx.spawner,
                EventHandler::new(handler_ctx, ctx.service_time, Arc::clone(&ctx.log)),
            );
            return WorkerStep::Dispatched { borrowed_from };
        }

        ctx.log
            .warn(format!("{dept} No available or borrowed resources, event delayed"));
        if self.requeue.send(event).await.is_err() {
            ctx.log.error(format!("{dept} queue closed, event {} lost", event.id));
        }
        tokio::time::sleep(ctx.backoff).await;
        WorkerStep::Requeued
    }
}
