//! Runtime adapters, system wiring, and the status snapshot.

pub mod status;
pub mod system;
pub mod tokio_spawner;

pub use status::{DepartmentStatus, SystemStatus};
pub use system::EmergencySystem;
pub use tokio_spawner::TokioSpawner;
