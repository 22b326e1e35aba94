//! Fluent model builders and the assembler that reconciles them with a
//! descriptor registry.
//!
//! This crate defines the registry "port" (`DescriptorRegistry`) that the
//! infrastructure layer implements, and everything that talks to it: the
//! member resolver, the builder tree (type, member, and feature builders),
//! and the model assembler. It depends only on `fluentmodel-types` -- never
//! on `fluentmodel-infra`.
//!
//! ```ignore
//! let assembly = ModelAssembler::new(ctx.clone()).assemble_iter([
//!     TypeBuilder::<Order>::new(&ctx).map(Builder::boxed),
//! ])?;
//! ```

pub mod assembler;
pub mod builder;
pub mod context;
pub mod feature;
pub mod prelude;
pub mod registry;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;
