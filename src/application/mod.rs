// Application layer - use cases and runtime tasks
pub mod animation;
pub mod dashboard_service;
pub mod poller;
pub mod telemetry_source;
