//! Engine configuration types for fluentmodel.
//!
//! `EngineConfig` represents the optional `fluentmodel.toml` that tunes how
//! selectors map to registry member names, how the assembler refreshes type
//! descriptors, and appearance-rule defaults.

use serde::{Deserialize, Serialize};

/// Top-level engine configuration. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How a selector's field name becomes a registry member name.
    #[serde(default)]
    pub member_naming: MemberNaming,

    /// How many times a type descriptor is refreshed after finalize.
    #[serde(default)]
    pub refresh_policy: RefreshPolicy,

    #[serde(default)]
    pub appearance: AppearanceConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            member_naming: MemberNaming::default(),
            refresh_policy: RefreshPolicy::default(),
            appearance: AppearanceConfig::default(),
        }
    }
}

/// Mapping from a Rust field identifier to a registry member name.
///
/// - `PascalCase`: `is_cancelled` -> `IsCancelled`
/// - `Verbatim`: the identifier is used unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberNaming {
    PascalCase,
    Verbatim,
}

impl Default for MemberNaming {
    fn default() -> Self {
        MemberNaming::PascalCase
    }
}

/// Refresh strategy for the assembler's reconciliation pass.
///
/// - `Distinct`: each distinct type descriptor is refreshed once
/// - `PerBuilder`: every type builder refreshes its descriptor, even when
///   several builders target the same type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    Distinct,
    PerBuilder,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        RefreshPolicy::Distinct
    }
}

/// Appearance-rule settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceConfig {
    /// Last segment of generated rule ids when the caller does not pass one.
    #[serde(default = "default_discriminator")]
    pub default_discriminator: String,
}

fn default_discriminator() -> String {
    "Visibility".to_string()
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            default_discriminator: default_discriminator(),
        }
    }
}
