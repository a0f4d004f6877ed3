// Domain layer - pure train, metric and chart models
pub mod animator;
pub mod geometry;
pub mod hover;
pub mod metric;
pub mod train;
