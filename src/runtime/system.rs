//! Wires the buffer, pools, queues, and tasks into a running system.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::SimulationConfig;
use crate::core::{
    inbound_queues, BorrowPolicy, Department, DepartmentWorker, DispatchError, Dispatcher,
    EventBuffer, EventGenerator, EventLog, HandlerReport, HandlerSet, PoolSet, Routes, Spawn,
    WorkerContext,
};
use crate::runtime::{DepartmentStatus, SystemStatus};

/// A running simulation: generator, dispatcher, and three department workers.
#[derive(Debug)]
pub struct EmergencySystem {
    config: SimulationConfig,
    buffer: Arc<EventBuffer>,
    pools: Arc<PoolSet>,
    routes: Routes,
    log: Arc<EventLog>,
    handlers: HandlerSet,
    tasks: Vec<JoinHandle<()>>,
}

impl EmergencySystem {
    /// Validate `config`, build shared state, and spawn the long-lived tasks.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConfig`] if validation fails.
    pub fn start<S: Spawn>(config: SimulationConfig, spawner: &S) -> Result<Self, DispatchError> {
        config.validate()?;

        let buffer = Arc::new(EventBuffer::new(config.buffer_capacity));
        let pools = Arc::new(PoolSet::new(&config.capacities, BorrowPolicy::default()));
        let log = Arc::new(EventLog::new(config.log_capacity));
        let handlers = HandlerSet::new();
        let (routes, inboxes) = inbound_queues(config.queue_depth);

        let mut tasks = Vec::with_capacity(2 + Department::ALL.len());

        let generator = EventGenerator::new(
            Arc::clone(&buffer),
            Arc::clone(&log),
            config.generation_interval,
            config.seed,
        );
        tasks.push(spawner.spawn(generator.run()));

        let dispatcher = Dispatcher::new(
            Arc::clone(&buffer),
            routes.clone(),
            Arc::clone(&log),
            config.dispatch_period(),
            config.route_timeout(),
        );
        tasks.push(spawner.spawn(dispatcher.run()));

        let ctx = WorkerContext {
            pools: Arc::clone(&pools),
            log: Arc::clone(&log),
            handlers: handlers.clone(),
            spawner: spawner.clone(),
            service_time: config.service_time,
            backoff: config.backoff(),
        };
        for (department, inbox) in Department::ALL.into_iter().zip(inboxes) {
            let worker = DepartmentWorker::new(
                department,
                inbox,
                routes.sender(department).clone(),
                ctx.clone(),
            );
            tasks.push(spawner.spawn(worker.run()));
        }

        tracing::info!(
            total_units = config.capacities.total(),
            buffer_capacity = config.buffer_capacity,
            queue_depth = config.queue_depth,
            "emergency dispatch started"
        );

        Ok(Self {
            config,
            buffer,
            pools,
            routes,
            log,
            handlers,
            tasks,
        })
    }

    /// Current state of buffer, pools, queues, and log.
    pub fn status(&self) -> SystemStatus {
        let departments = Department::ALL
            .iter()
            .map(|&department| {
                let pool = self.pools.pool(department);
                DepartmentStatus {
                    department,
                    available: pool.available(),
                    max: pool.max(),
                    queue_depth: self.routes.depth(department),
                }
            })
            .collect();

        SystemStatus {
            pending: self.buffer.snapshot(),
            departments,
            recent_log: self.log.recent(),
        }
    }

    /// Configuration in force.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Pending-event buffer.
    #[must_use]
    pub const fn buffer(&self) -> &Arc<EventBuffer> {
        &self.buffer
    }

    /// Department pools.
    #[must_use]
    pub const fn pools(&self) -> &Arc<PoolSet> {
        &self.pools
    }

    /// Operator log.
    #[must_use]
    pub const fn log(&self) -> &Arc<EventLog> {
        &self.log
    }

    /// Spawned handlers.
    #[must_use]
    pub const fn handlers(&self) -> &HandlerSet {
        &self.handlers
    }

    /// Stop the long-lived tasks, then wait for in-flight handlers so every
    /// committed unit is returned.
    pub async fn shutdown(self) -> Vec<HandlerReport> {
        for task in &self.tasks {
            task.abort();
        }
        for task in self.tasks {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::error!("task failed during shutdown: {e}");
                }
            }
        }
        let reports = self.handlers.join_all().await;
        tracing::info!(handlers = reports.len(), "emergency dispatch stopped");
        reports
    }
}
