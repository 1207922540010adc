//! One-shot event handlers and the set tracking them.
//!
//! A handler exists only after a unit was committed to it. It simulates the
//! service time, returns the unit to the pool it came from, and reports. It
//! never fails and is never cancelled by the worker that spawned it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::config::MsRange;
use crate::core::{Department, Event, EventLog, Grant, ResourcePool, Spawn};

/// Everything a handler needs to service one event.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    /// Event being serviced.
    pub event: Event,
    /// Department servicing it.
    pub department: Department,
    /// Department's own pool.
    pub own_pool: Arc<ResourcePool>,
    /// Whether the unit came from a sibling.
    pub borrowed: bool,
    /// Lending pool, set when borrowed.
    pub lender: Option<Arc<ResourcePool>>,
}

impl HandlerContext {
    /// Build a context from a grant obtained for `department`.
    #[must_use]
    pub fn new(event: Event, department: Department, own_pool: Arc<ResourcePool>, grant: Grant) -> Self {
        let borrowed = grant.is_borrowed();
        Self {
            event,
            department,
            own_pool,
            borrowed,
            lender: borrowed.then_some(grant.pool),
        }
    }

    /// Pool the unit must go back to.
    #[must_use]
    pub fn release_target(&self) -> &Arc<ResourcePool> {
        match (&self.lender, self.borrowed) {
            (Some(lender), true) => lender,
            _ => &self.own_pool,
        }
    }

    /// Lending department, if borrowed.
    #[must_use]
    pub fn lender_department(&self) -> Option<Department> {
        self.lender.as_ref().map(|p| p.department())
    }
}

/// Outcome of a completed handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerReport {
    /// Serviced event.
    pub event: Event,
    /// Servicing department.
    pub department: Department,
    /// Department the unit was returned to, if it was borrowed.
    pub lender: Option<Department>,
    /// Simulated service time.
    pub elapsed: Duration,
}

/// Transient unit of work servicing one event.
#[derive(Debug)]
pub struct EventHandler {
    ctx: HandlerContext,
    service_time: MsRange,
    log: Arc<EventLog>,
}

impl EventHandler {
    /// Create a handler.
    #[must_use]
    pub const fn new(ctx: HandlerContext, service_time: MsRange, log: Arc<EventLog>) -> Self {
        Self {
            ctx,
            service_time,
            log,
        }
    }

    /// Simulate service, release the unit, and report.
    pub async fn run(self) -> HandlerReport {
        let service = self.service_time.sample(&mut rand::rng());
        let started = tokio::time::Instant::now();
        tokio::time::sleep(service).await;
        let elapsed = started.elapsed();

        let target = self.ctx.release_target();
        if let Err(e) = target.release() {
            self.log
                .error(format!("{} release failed: {e}", self.ctx.department));
        }
        tracing::debug!(
            event = self.ctx.event.id,
            department = %self.ctx.department,
            returned_to = %target.department(),
            available = target.available(),
            "unit released"
        );
        self.log.append(format!(
            "{} completed event in {} ms",
            self.ctx.department,
            elapsed.as_millis()
        ));

        HandlerReport {
            event: self.ctx.event,
            department: self.ctx.department,
            lender: self.ctx.lender_department(),
            elapsed,
        }
    }
}

#[derive(Debug, Default)]
struct HandlerSetInner {
    handles: Mutex<Vec<JoinHandle<HandlerReport>>>,
    spawned: AtomicU64,
}

/// Join handles of spawned handlers.
///
/// Finished handles are reaped on every spawn, so `join_all` only reports
/// handlers that were still tracked when it was called.
#[derive(Debug, Default, Clone)]
pub struct HandlerSet {
    inner: Arc<HandlerSetInner>,
}

impl HandlerSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `handler` and track its handle. Does not wait for it.
    pub fn spawn<S: Spawn>(&self, spawner: &S, handler: EventHandler) {
        let handle = spawner.spawn(handler.run());
        let mut handles = self.inner.handles.lock();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
        self.inner.spawned.fetch_add(1, Ordering::Relaxed);
    }

    /// Handlers still running.
    pub fn in_flight(&self) -> usize {
        self.inner
            .handles
            .lock()
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Handlers spawned since creation.
    pub fn spawned(&self) -> u64 {
        self.inner.spawned.load(Ordering::Relaxed)
    }

    /// Await every tracked handler and return their reports.
    pub async fn join_all(&self) -> Vec<HandlerReport> {
        let handles = std::mem::take(&mut *self.inner.handles.lock());
        let mut reports = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => tracing::error!("handler task failed: {e}"),
            }
        }
        reports
    }
}
