//! # Emergency Dispatch
//!
//! A concurrent simulation of a municipal emergency-dispatch centre.
//!
//! Emergency calls arrive at random, wait in a bounded priority buffer, and are
//! routed by a fixed-rate dispatcher to one of three departments (police,
//! ambulance, fire). Each department owns a small pool of responder units. When
//! its own pool is empty a department may borrow a unit from a sibling, in a
//! fixed preference order, under a single system-wide negotiation lock.
//!
//! ## Data Flow
//!
//! ```text
//! EventGenerator -> EventBuffer -> Dispatcher -> department queue
//!     -> DepartmentWorker -> ResourcePool (own or borrowed) -> EventHandler
//!     -> release to the owning pool + log
//! ```
//!
//! ## Drop vs Backoff
//!
//! - A full event buffer drops the new event.
//! - A department queue that stays full for the routing bound (100 ms) drops
//!   the routed event.
//! - A worker that finds no unit anywhere requeues the event and backs off;
//!   this path never drops.
//!
//! ## Example
//!
//! ```rust,ignore
//! use emergency_dispatch::config::SimulationConfig;
//! use emergency_dispatch::runtime::{EmergencySystem, TokioSpawner};
//!
//! let system = EmergencySystem::start(SimulationConfig::default(), &TokioSpawner::current())?;
//! tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//! println!("{}", system.status());
//! system.shutdown().await;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Dispatch engine: events, buffer, pools, dispatcher, workers, handlers.
pub mod core;
/// Configuration models for departments, timing, and capacities.
pub mod config;
/// Runtime adapters, system wiring, and status snapshot.
pub mod runtime;
/// Shared utilities.
pub mod util;
