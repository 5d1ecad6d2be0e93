// Application layer modules
pub mod health_handler;

// Re-exports
pub use health_handler::{CheckReport, HealthHandler, HealthReport};
