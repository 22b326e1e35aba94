//! Shared domain types for fluentmodel.
//!
//! This crate contains the value types exchanged between the fluent builders
//! and a descriptor registry: descriptor handles, directives (including the
//! conditional-appearance rule), criteria predicates, engine configuration,
//! and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, thiserror, bitflags.

pub mod appearance;
pub mod config;
pub mod criteria;
pub mod descriptor;
pub mod directive;
pub mod error;
