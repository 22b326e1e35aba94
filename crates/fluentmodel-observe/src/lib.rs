//! Observability setup for fluentmodel: tracing subscriber initialization
//! and the span attribute names the CLI records.

pub mod attrs;
pub mod tracing_setup;
