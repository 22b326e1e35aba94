//! Model assembler: collects top-level type builders, runs the finalize
//! cascade once, and reconciles the registry.
//!
//! Assembly is all-or-nothing with respect to finalize and refresh: if any
//! builder fails to construct, the first error is returned before anything
//! is finalized or refreshed. Directives that builders wrote eagerly before
//! the failure stay on the registry.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;

use fluentmodel_types::config::RefreshPolicy;
use fluentmodel_types::descriptor::TypeDescriptor;
use fluentmodel_types::error::ModelError;

use crate::builder::{walk, BoxedBuilder, Builder, BuilderManager, BuilderSet};
use crate::context::ModelContext;

/// Source of the top-level builders for one assembly run.
pub trait ModelDefinition {
    fn build_up_model(&self, ctx: &ModelContext) -> Result<Vec<BoxedBuilder>, ModelError>;
}

impl<F> ModelDefinition for F
where
    F: Fn(&ModelContext) -> Result<Vec<BoxedBuilder>, ModelError>,
{
    fn build_up_model(&self, ctx: &ModelContext) -> Result<Vec<BoxedBuilder>, ModelError> {
        self(ctx)
    }
}

/// Container for the top-level builders; forwards finalize to them.
#[derive(Debug, Default)]
struct RootBuilder {
    children: BuilderSet,
}

impl Builder for RootBuilder {
    fn build(&mut self) {
        self.children.build_all();
    }

    fn builders(&self) -> &[BoxedBuilder] {
        self.children.as_slice()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl BuilderManager for RootBuilder {
    fn builder_set(&mut self) -> &mut BuilderSet {
        &mut self.children
    }
}

/// Result of a successful assembly run.
pub struct Assembly {
    root: RootBuilder,
    refreshed: Vec<TypeDescriptor>,
}

impl Assembly {
    /// Top-level builders in registration order.
    pub fn builders(&self) -> &[BoxedBuilder] {
        self.root.builders()
    }

    /// Descriptors refreshed by this run, in refresh order.
    pub fn refreshed(&self) -> &[TypeDescriptor] {
        &self.refreshed
    }

    /// Run the finalize cascade again. Nothing is refreshed.
    pub fn rebuild(&mut self) {
        self.root.build();
    }
}

impl fmt::Debug for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assembly")
            .field("root", &self.root)
            .field("refreshed", &self.refreshed)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ModelAssembler {
    ctx: ModelContext,
}

impl ModelAssembler {
    pub fn new(ctx: ModelContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ModelContext {
        &self.ctx
    }

    /// Assemble the builders produced by `definition`.
    pub fn assemble<D>(&self, definition: &D) -> Result<Assembly, ModelError>
    where
        D: ModelDefinition + ?Sized,
    {
        let builders = definition.build_up_model(&self.ctx)?;
        self.assemble_iter(builders.into_iter().map(Ok))
    }

    /// Assemble builders pulled one at a time from `builders`.
    ///
    /// Iteration stops at the first error, so builders after it are never
    /// constructed.
    pub fn assemble_iter<I>(&self, builders: I) -> Result<Assembly, ModelError>
    where
        I: IntoIterator<Item = Result<BoxedBuilder, ModelError>>,
    {
        let mut root = RootBuilder::default();
        for builder in builders {
            let builder = builder.inspect_err(|e| tracing::warn!(error = %e, "model builder failed"))?;
            root.add_builder(builder);
        }

        tracing::debug!(builders = root.children.len(), "finalizing model");
        root.build();

        let refreshed = self.refresh(&root);
        tracing::info!(
            builders = root.children.len(),
            refreshed = refreshed.len(),
            policy = ?self.ctx.config().refresh_policy,
            "model assembled"
        );

        Ok(Assembly { root, refreshed })
    }

    fn refresh(&self, root: &RootBuilder) -> Vec<TypeDescriptor> {
        let mut targets = Vec::new();
        walk(root.builders(), &mut |node| {
            if let Some(descriptor) = node.type_descriptor() {
                targets.push(descriptor.clone());
            }
        });

        if self.ctx.config().refresh_policy == RefreshPolicy::Distinct {
            let mut seen = HashSet::new();
            targets.retain(|descriptor| seen.insert(descriptor.clone()));
        }

        for descriptor in &targets {
            tracing::debug!(type_name = %descriptor, "refreshing type descriptor");
            self.ctx.registry().refresh(descriptor);
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::rc::Rc;

    use fluentmodel_types::config::EngineConfig;
    use fluentmodel_types::error::{RegistryError, SelectorError};

    use crate::builder::{DirectiveSink, TypeBuilder};
    use crate::feature::AppearanceExt;
    use crate::member;
    use crate::test_support::{Customer, Order, RecordingRegistry};

    fn context(config: EngineConfig) -> (Rc<RecordingRegistry>, ModelContext) {
        let registry = Rc::new(RecordingRegistry::sample());
        let ctx = ModelContext::with_config(registry.clone(), config);
        (registry, ctx)
    }

    fn order_with_two_members(ctx: &ModelContext) -> Result<BoxedBuilder, ModelError> {
        let mut order = TypeBuilder::<Order>::new(ctx)?;
        order.for_member(member!(Order => total))?.has_caption("Total");
        order.for_member(member!(Order => status))?.is_visible_in_list_view(true);
        Ok(order.boxed())
    }

    #[test]
    fn test_one_refresh_per_distinct_type() {
        let (registry, ctx) = context(EngineConfig::default());
        let assembly = ModelAssembler::new(ctx.clone())
            .assemble_iter([
                order_with_two_members(&ctx),
                TypeBuilder::<Customer>::new(&ctx).map(Builder::boxed),
                TypeBuilder::<Order>::new(&ctx).map(Builder::boxed),
            ])
            .unwrap();

        assert_eq!(registry.refreshed(), vec!["Order".to_string(), "Customer".to_string()]);
        assert_eq!(assembly.refreshed().len(), 2);
        assert_eq!(assembly.builders().len(), 3);
    }

    #[test]
    fn test_per_builder_policy_refreshes_every_occurrence() {
        let config = EngineConfig {
            refresh_policy: RefreshPolicy::PerBuilder,
            ..EngineConfig::default()
        };
        let (registry, ctx) = context(config);
        ModelAssembler::new(ctx.clone())
            .assemble_iter([
                TypeBuilder::<Order>::new(&ctx).map(Builder::boxed),
                TypeBuilder::<Order>::new(&ctx).map(Builder::boxed),
            ])
            .unwrap();

        assert_eq!(registry.refreshed(), vec!["Order".to_string(), "Order".to_string()]);
    }

    #[test]
    fn test_assemble_through_definition_closure() {
        let (registry, ctx) = context(EngineConfig::default());
        let definition = |ctx: &ModelContext| -> Result<Vec<BoxedBuilder>, ModelError> {
            let mut order = TypeBuilder::<Order>::new(ctx)?;
            order
                .for_member(member!(Order => total))?
                .with_appearance()
                .for_item_types(["LayoutItem", "Action"])
                .targeting("Status")
                .when("IsCancelled=true");
            Ok(vec![order.boxed()])
        };

        ModelAssembler::new(ctx).assemble(&definition).unwrap();

        let rule = registry
            .member_directives("Order", "Total")
            .into_iter()
            .find_map(|d| d.as_appearance().cloned())
            .unwrap();
        assert_eq!(rule.id, "Order.Total.Visibility");
        assert_eq!(rule.appearance_item_type, "LayoutItem;Action");
        assert_eq!(rule.target_items.as_deref(), Some("Status"));
        assert_eq!(rule.criteria.as_deref(), Some("IsCancelled=true"));
        assert_eq!(registry.refreshed(), vec!["Order".to_string()]);
    }

    #[test]
    fn test_selector_error_aborts_before_finalize_and_refresh() {
        let (registry, ctx) = context(EngineConfig::default());
        let definition = |ctx: &ModelContext| -> Result<Vec<BoxedBuilder>, ModelError> {
            let mut order = TypeBuilder::<Order>::new(ctx)?;
            order
                .for_member(member!(Order => status))?
                .with_appearance()
                .targeting_all();
            order.has_caption("Orders");
            order.for_member(member!(Order => total.abs()))?;
            Ok(vec![order.boxed()])
        };

        let err = ModelAssembler::new(ctx).assemble(&definition).unwrap_err();
        assert!(matches!(err, ModelError::Selector(SelectorError::NotAMemberAccess(_))));
        assert!(registry.refreshed().is_empty());

        // eager writes stay, accumulated targets were never materialized
        assert!(!registry.type_directives("Order").is_empty());
        let rule = registry
            .member_directives("Order", "Status")
            .into_iter()
            .find_map(|d| d.as_appearance().cloned())
            .unwrap();
        assert!(rule.target_items.is_none());
    }

    #[test]
    fn test_lazy_sequence_stops_at_first_error() {
        let (registry, ctx) = context(EngineConfig::default());
        let constructed = Cell::new(0);
        let steps: [&dyn Fn() -> Result<BoxedBuilder, ModelError>; 3] = [
            &|| TypeBuilder::<Order>::new(&ctx).map(Builder::boxed),
            &|| Err(RegistryError::TypeNotFound("Invoice".to_string()).into()),
            &|| TypeBuilder::<Customer>::new(&ctx).map(Builder::boxed),
        ];

        let err = ModelAssembler::new(ctx.clone())
            .assemble_iter(steps.iter().map(|step| {
                constructed.set(constructed.get() + 1);
                step()
            }))
            .unwrap_err();

        assert_eq!(err, ModelError::Registry(RegistryError::TypeNotFound("Invoice".to_string())));
        assert_eq!(constructed.get(), 2);
        assert!(registry.refreshed().is_empty());
    }

    #[test]
    fn test_rebuild_reproduces_accumulated_values() {
        let (registry, ctx) = context(EngineConfig::default());
        let mut order = TypeBuilder::<Order>::new(&ctx).unwrap();
        order
            .for_member(member!(Order => status))
            .unwrap()
            .with_appearance()
            .targeting_all()
            .except_target("X")
            .except_target("Y");

        let mut assembly = ModelAssembler::new(ctx).assemble_iter([Ok(order.boxed())]).unwrap();
        let read_targets = || {
            registry
                .member_directives("Order", "Status")
                .iter()
                .find_map(|d| d.as_appearance().and_then(|r| r.target_items.clone()))
        };
        assert_eq!(read_targets().as_deref(), Some("*;X;Y"));

        assembly.rebuild();
        assert_eq!(read_targets().as_deref(), Some("*;X;Y"));
        assert_eq!(registry.refreshed().len(), 1);
    }

    #[test]
    fn test_empty_model_refreshes_nothing() {
        let (registry, ctx) = context(EngineConfig::default());
        let assembly = ModelAssembler::new(ctx)
            .assemble(&|_: &ModelContext| -> Result<Vec<BoxedBuilder>, ModelError> { Ok(Vec::new()) })
            .unwrap();
        assert!(assembly.builders().is_empty());
        assert!(assembly.refreshed().is_empty());
        assert!(registry.refreshed().is_empty());
    }
}
