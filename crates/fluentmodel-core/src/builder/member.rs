//! Member builder: configures one member of a declared type.

use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;

use fluentmodel_types::descriptor::{DirectiveTarget, MemberDescriptor};
use fluentmodel_types::directive::{Directive, SharedDirective};
use fluentmodel_types::error::ModelError;

use crate::context::{ModelContext, ModelType};
use crate::resolver::{MemberSelector, Untyped};

use super::sink::{keys, DirectiveSink};
use super::{BoxedBuilder, Builder, BuilderManager, BuilderSet};

/// Fluent configuration of one member of `T` whose value type is `P`.
///
/// `P` is [`Untyped`] for members selected by raw name; extension traits
/// such as edit masks key their availability off it.
pub struct MemberBuilder<T, P = Untyped> {
    descriptor: MemberDescriptor,
    ctx: ModelContext,
    children: BuilderSet,
    _marker: PhantomData<fn(&T) -> P>,
}

impl<T: ModelType, P: 'static> MemberBuilder<T, P> {
    pub fn new(ctx: &ModelContext, descriptor: MemberDescriptor) -> Self {
        Self {
            descriptor,
            ctx: ctx.clone(),
            children: BuilderSet::new(),
            _marker: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &MemberDescriptor {
        &self.descriptor
    }

    /// Full name of the declaring type.
    pub fn owner(&self) -> &str {
        self.descriptor.owner_name()
    }

    pub fn context(&self) -> &ModelContext {
        &self.ctx
    }

    /// Resolve another member of `T` to its declared name.
    pub fn resolve<Q>(&self, selector: &MemberSelector<T, Q>) -> Result<String, ModelError> {
        Ok(self.ctx.resolver().resolve(selector)?)
    }

    pub fn has_display_format(&mut self, format: &str) -> &mut Self {
        self.with_model_default(keys::DISPLAY_FORMAT, format)
    }

    pub fn is_visible_in_detail_view(&mut self, visible: bool) -> &mut Self {
        self.with_directive(Directive::VisibleInDetailView { visible })
    }

    pub fn is_visible_in_list_view(&mut self, visible: bool) -> &mut Self {
        self.with_directive(Directive::VisibleInListView { visible })
    }

    pub fn is_visible_in_lookup_list_view(&mut self, visible: bool) -> &mut Self {
        self.with_directive(Directive::VisibleInLookupListView { visible })
    }

    pub fn is_not_visible_in_detail_view(&mut self) -> &mut Self {
        self.is_visible_in_detail_view(false)
    }

    pub fn is_not_visible_in_list_view(&mut self) -> &mut Self {
        self.is_visible_in_list_view(false)
    }

    pub fn is_not_visible_in_lookup_list_view(&mut self) -> &mut Self {
        self.is_visible_in_lookup_list_view(false)
    }

    /// Write the same visibility to the detail, list, and lookup list views.
    pub fn is_visible_in_any_view(&mut self, visible: bool) -> &mut Self {
        self.is_visible_in_detail_view(visible)
            .is_visible_in_list_view(visible)
            .is_visible_in_lookup_list_view(visible)
    }

    pub fn is_not_visible_in_any_view(&mut self) -> &mut Self {
        self.is_visible_in_any_view(false)
    }

    pub fn using_property_editor(&mut self, editor: &str) -> &mut Self {
        self.with_model_default(keys::PROPERTY_EDITOR_TYPE, editor)
    }

    /// Use the editor type `E`, recorded by its Rust type path.
    pub fn using_property_editor_type<E: ?Sized>(&mut self) -> &mut Self {
        self.using_property_editor(type_name::<E>())
    }

    pub fn is_immediate_post_data(&mut self) -> &mut Self {
        self.with_directive(Directive::ImmediatePostData)
    }
}

impl<T: ModelType, P: 'static> DirectiveSink for MemberBuilder<T, P> {
    fn attach(&mut self, directive: SharedDirective) {
        tracing::debug!(member = %self.descriptor, kind = %directive.kind(), "attaching member directive");
        self.ctx
            .registry()
            .attach_directive(DirectiveTarget::Member(&self.descriptor), directive);
    }
}

impl<T: ModelType, P: 'static> BuilderManager for MemberBuilder<T, P> {
    fn builder_set(&mut self) -> &mut BuilderSet {
        &mut self.children
    }
}

impl<T: ModelType, P: 'static> Builder for MemberBuilder<T, P> {
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

impl<T, P> fmt::Debug for MemberBuilder<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberBuilder")
            .field("descriptor", &self.descriptor)
            .field("children", &self.children)
            .finish()
    }
}
