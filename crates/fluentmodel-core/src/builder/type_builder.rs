//! Type builder: the root of one builder tree.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use fluentmodel_types::descriptor::{DirectiveTarget, TypeDescriptor, TypeIdentity};
use fluentmodel_types::directive::{Directive, SharedDirective};
use fluentmodel_types::error::ModelError;

use crate::context::{ModelContext, ModelType};
use crate::resolver::MemberSelector;

use super::member::MemberBuilder;
use super::sink::DirectiveSink;
use super::{BoxedBuilder, Builder, BuilderManager, BuilderSet};

/// Fluent configuration of one declared type `T`.
///
/// Type-level shorthands are written to the registry as they are called.
/// Member builders created through [`for_member`](Self::for_member) are owned
/// by this builder and finalized with it.
pub struct TypeBuilder<T: ModelType> {
    descriptor: TypeDescriptor,
    ctx: ModelContext,
    children: BuilderSet,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ModelType> TypeBuilder<T> {
    /// Resolve `T` in the context's registry and run `T::build_up`.
    pub fn new(ctx: &ModelContext) -> Result<Self, ModelError> {
        let identity = TypeIdentity::new(T::FULL_NAME);
        let descriptor = ctx.registry().find_type(&identity)?;
        Self::from_descriptor(ctx, descriptor)
    }

    /// Build against a caller-supplied descriptor and run `T::build_up`.
    pub fn from_descriptor(ctx: &ModelContext, descriptor: TypeDescriptor) -> Result<Self, ModelError> {
        tracing::debug!(type_name = %descriptor, "creating type builder");

        let mut builder = Self {
            descriptor,
            ctx: ctx.clone(),
            children: BuilderSet::new(),
            _marker: PhantomData,
        };
        T::build_up(&mut builder)?;
        Ok(builder)
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn context(&self) -> &ModelContext {
        &self.ctx
    }

    /// Start configuring the member `selector` picks out.
    pub fn for_member<P: 'static>(
        &mut self,
        selector: MemberSelector<T, P>,
    ) -> Result<&mut MemberBuilder<T, P>, ModelError> {
        let name = self.ctx.resolver().resolve(&selector)?;
        self.member_builder(&name)
    }

    /// Start configuring a member by its declared name.
    pub fn for_member_named(&mut self, name: &str) -> Result<&mut MemberBuilder<T>, ModelError> {
        self.member_builder(name)
    }

    fn member_builder<P: 'static>(&mut self, name: &str) -> Result<&mut MemberBuilder<T, P>, ModelError> {
        let member = self.ctx.registry().find_member(&self.descriptor, name)?;
        tracing::debug!(member = %member, "registering member builder");
        let builder = MemberBuilder::new(&self.ctx, member);
        Ok(self.register_child(builder))
    }

    pub fn has_image(&mut self, image: &str) -> &mut Self {
        self.with_directive(Directive::ImageName {
            image: image.to_string(),
        })
    }

    pub fn has_default_member<P>(&mut self, selector: MemberSelector<T, P>) -> Result<&mut Self, ModelError> {
        let name = self.ctx.resolver().resolve(&selector)?;
        Ok(self.has_default_member_named(&name))
    }

    pub fn has_default_member_named(&mut self, member: &str) -> &mut Self {
        self.with_directive(Directive::DefaultProperty {
            member: member.to_string(),
        })
    }

    pub fn has_object_caption_format(&mut self, format: &str) -> &mut Self {
        self.with_directive(Directive::ObjectCaptionFormat {
            format: format.to_string(),
        })
    }

    /// Caption format that renders a single member: `{0:<Member>}`.
    pub fn has_object_caption_format_member<P>(
        &mut self,
        selector: MemberSelector<T, P>,
    ) -> Result<&mut Self, ModelError> {
        let name = self.ctx.resolver().resolve(&selector)?;
        Ok(self.has_object_caption_format(&format!("{{0:{name}}}")))
    }
}

impl<T: ModelType> DirectiveSink for TypeBuilder<T> {
    fn attach(&mut self, directive: SharedDirective) {
        tracing::debug!(
            type_name = %self.descriptor,
            kind = %directive.kind(),
            "attaching type directive"
        );
        self.ctx
            .registry()
            .attach_directive(DirectiveTarget::Type(&self.descriptor), directive);
    }
}

impl<T: ModelType> BuilderManager for TypeBuilder<T> {
    fn builder_set(&mut self) -> &mut BuilderSet {
        &mut self.children
    }
}

impl<T: ModelType> Builder for TypeBuilder<T> {
    fn build(&mut self) {
        tracing::debug!(type_name = %self.descriptor, children = self.children.len(), "finalizing type builder");
        self.children.build_all();
    }

    fn builders(&self) -> &[BoxedBuilder] {
        self.children.as_slice()
    }

    fn type_descriptor(&self) -> Option<&TypeDescriptor> {
        Some(&self.descriptor)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: ModelType> fmt::Debug for TypeBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeBuilder")
            .field("descriptor", &self.descriptor)
            .field("children", &self.children)
            .finish()
    }
}
