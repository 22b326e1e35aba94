//! Infrastructure layer for fluentmodel.
//!
//! Contains the in-memory implementation of the `DescriptorRegistry` port
//! defined in `fluentmodel-core`, the TOML catalog loader that seeds it, and
//! the engine configuration loader.

pub mod catalog;
pub mod config;
pub mod registry;
