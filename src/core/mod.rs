//! Dispatch engine: event buffer, dispatcher, department workers, and pools.

pub mod borrow;
pub mod department;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod event_buffer;
pub mod generator;
pub mod handler;
pub mod log;
pub mod queue;
pub mod resource_pool;
pub mod spawn;

pub use borrow::{BorrowPolicy, Grant, PoolSet, UnitSource};
pub use department::{DepartmentWorker, WorkerContext, WorkerStep};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{AppResult, DispatchError};
pub use event::{Department, Event, EventId, Priority};
pub use event_buffer::EventBuffer;
pub use generator::EventGenerator;
pub use handler::{EventHandler, HandlerContext, HandlerReport, HandlerSet};
pub use log::{EventLog, LogLine, Severity};
pub use queue::{inbound_queues, Routes};
pub use resource_pool::ResourcePool;
pub use spawn::Spawn;
