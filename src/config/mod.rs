//! Configuration models for departments, timing, and the event buffer.

pub mod simulation;

pub use simulation::{
    DepartmentCapacities, MsRange, SimulationConfig, MAX_BUFFER_CAPACITY, MAX_LOG_CAPACITY,
    MAX_QUEUE_DEPTH,
};
