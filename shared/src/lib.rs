pub mod error;
pub mod input;
pub mod telemetry;
pub mod types;
