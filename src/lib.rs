// Chart-geometry core for the single-train operational dashboard.
//
// The domain layer holds the pure engine (axis scaling, point
// projection, tooltip placement, the headline count-up); the
// application layer runs the polling and animation tasks and builds
// the `DashboardView` a renderer consumes; the infrastructure layer
// adapts the HTTP telemetry endpoint and the TOML configuration.
pub mod application;
pub mod domain;
pub mod infrastructure;
