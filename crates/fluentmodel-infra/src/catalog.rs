//! TOML type catalog that seeds an [`InMemoryRegistry`].
//!
//! ```toml
//! [[types]]
//! name = "sales.Order"
//! members = ["Total", "Status", "IsCancelled"]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::InMemoryRegistry;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("type '{0}' is declared more than once")]
    DuplicateType(String),

    #[error("member '{member}' is declared more than once on type '{type_name}'")]
    DuplicateMember { type_name: String, member: String },
}

/// One declared type and its member names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

impl Catalog {
    /// Parse and validate catalog TOML.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), types = catalog.types.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Reject duplicate type names and duplicate members within a type.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut type_names = HashSet::new();
        for declaration in &self.types {
            if !type_names.insert(declaration.name.as_str()) {
                return Err(CatalogError::DuplicateType(declaration.name.clone()));
            }

            let mut members = HashSet::new();
            for member in &declaration.members {
                if !members.insert(member.as_str()) {
                    return Err(CatalogError::DuplicateMember {
                        type_name: declaration.name.clone(),
                        member: member.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Declare every type of this catalog in `registry`.
    pub fn seed(&self, registry: &InMemoryRegistry) -> Result<(), CatalogError> {
        for declaration in &self.types {
            if !registry.declare_type(&declaration.name, declaration.members.iter().cloned()) {
                return Err(CatalogError::DuplicateType(declaration.name.clone()));
            }
        }
        Ok(())
    }

    /// A fresh registry holding exactly this catalog's types.
    pub fn into_registry(self) -> Result<InMemoryRegistry, CatalogError> {
        let registry = InMemoryRegistry::new();
        self.seed(&registry)?;
        Ok(registry)
    }
}
