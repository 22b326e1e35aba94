//! Model context and the `ModelType` contract for declared types.

use std::fmt;
use std::rc::Rc;

use fluentmodel_types::config::EngineConfig;
use fluentmodel_types::error::ModelError;

use crate::builder::type_builder::TypeBuilder;
use crate::registry::DescriptorRegistry;
use crate::resolver::MemberResolver;

/// A Rust type whose metadata lives in a descriptor registry.
///
/// `FULL_NAME` is the identity the registry knows the type by. `build_up`
/// is the declarative configuration hook: it runs exactly once, at the end
/// of every `TypeBuilder<Self>` construction.
pub trait ModelType: Sized + 'static {
    const FULL_NAME: &'static str;

    fn build_up(_builder: &mut TypeBuilder<Self>) -> Result<(), ModelError> {
        Ok(())
    }
}

/// Everything a builder needs from its environment: the registry it writes
/// to and the engine configuration.
///
/// Cloning is cheap (two `Rc` bumps); every builder keeps its own clone.
#[derive(Clone)]
pub struct ModelContext {
    registry: Rc<dyn DescriptorRegistry>,
    config: Rc<EngineConfig>,
}

impl ModelContext {
    pub fn new(registry: Rc<dyn DescriptorRegistry>) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    pub fn with_config(registry: Rc<dyn DescriptorRegistry>, config: EngineConfig) -> Self {
        Self {
            registry,
            config: Rc::new(config),
        }
    }

    pub fn registry(&self) -> &dyn DescriptorRegistry {
        self.registry.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolver configured with this context's member naming policy.
    pub fn resolver(&self) -> MemberResolver {
        MemberResolver::new(self.config.member_naming)
    }
}

impl fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
