//! Session orchestration: the [`ServiceSystem`] context object, its real-time driver and an
//! automated expediter policy.

pub mod driver;
pub mod expediter;
mod service_system;

pub use driver::DriverReport;
pub use expediter::Expediter;
pub use service_system::{ReassignOutcome, ServiceSystem};
