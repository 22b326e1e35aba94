//! Span attribute names used when instrumenting model assembly.
//!
//! Spans declare these fields as `tracing::field::Empty` and fill them in
//! with `Span::record`, so the names here must match the field names in the
//! span declarations.

/// Path of the model file being assembled.
pub const MODEL_FILE: &str = "model.file";

/// Number of declared types seeded into the registry.
pub const MODEL_TYPES: &str = "model.types";

/// Full name of the type a builder targets.
pub const MODEL_TYPE: &str = "model.type";

/// Number of top-level builders handed to the assembler.
pub const ASSEMBLY_BUILDERS: &str = "model.assembly.builders";

/// Number of type descriptors refreshed by the assembler.
pub const ASSEMBLY_REFRESHED: &str = "model.assembly.refreshed";

/// Refresh policy in effect (`distinct` or `per_builder`).
pub const ASSEMBLY_REFRESH_POLICY: &str = "model.assembly.refresh_policy";

// --- Span names ---

pub const SPAN_ASSEMBLE: &str = "fmb.assemble";

/// One `[[model]]` table being turned into a type builder.
pub const SPAN_MODEL_TABLE: &str = "fmb.model_table";
