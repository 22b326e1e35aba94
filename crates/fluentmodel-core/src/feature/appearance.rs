//! Conditional-appearance feature builder.
//!
//! `with_appearance()` attaches one appearance rule to the member right
//! away and returns a builder that keeps editing that same rule. Scalar
//! fields (colors, priority, visibility, criteria, ...) are written through
//! to the attached rule on every call. The item-type, context, and target
//! lists are collected locally and only written at finalize, once every
//! child of the feature has been built.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use fluentmodel_types::appearance::{
    AppearanceItemType, AppearanceRule, Color, FontStyle, ViewItemVisibility, ViewType,
};
use fluentmodel_types::criteria::Criteria;
use fluentmodel_types::descriptor::MemberDescriptor;
use fluentmodel_types::directive::{Directive, SharedDirective};
use fluentmodel_types::error::ModelError;

use crate::builder::{
    Accumulator, BoxedBuilder, Builder, BuilderManager, BuilderSet, DirectiveSink, MemberBuilder,
};
use crate::context::ModelType;
use crate::resolver::{MemberResolver, MemberSelector};

/// Wildcard target token matching every item.
pub const ALL_TARGETS: &str = "*";

/// Entry point for the appearance feature on a member builder.
pub trait AppearanceExt<T> {
    /// Start a rule whose id ends with the configured default discriminator.
    fn with_appearance(&mut self) -> &mut AppearanceBuilder<T>;

    /// Start a rule with id `{Type}.{Member}.{discriminator}`.
    fn with_appearance_as(&mut self, discriminator: &str) -> &mut AppearanceBuilder<T>;
}

impl<T: ModelType, P: 'static> AppearanceExt<T> for MemberBuilder<T, P> {
    fn with_appearance(&mut self) -> &mut AppearanceBuilder<T> {
        let discriminator = self
            .context()
            .config()
            .appearance
            .default_discriminator
            .clone();
        self.with_appearance_as(&discriminator)
    }

    fn with_appearance_as(&mut self, discriminator: &str) -> &mut AppearanceBuilder<T> {
        let builder = AppearanceBuilder::attach_to(self, discriminator);
        self.register_child(builder)
    }
}

/// Builder for one appearance rule on a member of `T`.
pub struct AppearanceBuilder<T> {
    id: String,
    member: MemberDescriptor,
    directive: SharedDirective,
    resolver: MemberResolver,
    item_types: Accumulator,
    contexts: Accumulator,
    targets: Accumulator,
    children: BuilderSet,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ModelType> AppearanceBuilder<T> {
    /// Create the rule and attach it to `parent`'s member right away.
    ///
    /// The returned builder is not yet registered; `with_appearance_as`
    /// registers it as a child of `parent`.
    pub fn attach_to<P: 'static>(parent: &mut MemberBuilder<T, P>, discriminator: &str) -> Self {
        let member = parent.descriptor().clone();
        let id = format!("{}.{}.{}", member.owner_name(), member.name(), discriminator);
        tracing::debug!(rule_id = %id, "attaching appearance rule");

        let directive = SharedDirective::new(AppearanceRule::new(id.clone()).into());
        parent.attach(directive.clone());

        Self {
            id,
            member,
            directive,
            resolver: parent.context().resolver(),
            item_types: Accumulator::new(),
            contexts: Accumulator::new(),
            targets: Accumulator::new(),
            children: BuilderSet::new(),
            _marker: PhantomData,
        }
    }

    /// `{Type}.{Member}.{discriminator}`, fixed at construction.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current state of the attached rule, or `None` if the shared directive
    /// no longer holds one.
    pub fn rule(&self) -> Option<AppearanceRule> {
        self.with_rule(|rule| rule.clone())
    }

    /// Handle to the attached directive.
    pub fn directive(&self) -> &SharedDirective {
        &self.directive
    }

    pub fn member(&self) -> &MemberDescriptor {
        &self.member
    }

    fn with_rule<R>(&self, f: impl FnOnce(&mut AppearanceRule) -> R) -> Option<R> {
        self.directive.update(|directive| match directive {
            Directive::Appearance(rule) => Some(f(rule)),
            other => {
                tracing::warn!(rule_id = %self.id, kind = other.kind(), "appearance directive was replaced");
                None
            }
        })
    }

    fn edit(&mut self, f: impl FnOnce(&mut AppearanceRule)) -> &mut Self {
        self.with_rule(f);
        self
    }

    // -----------------------------------------------------------------------
    // Immediate fields
    // -----------------------------------------------------------------------

    pub fn using_fore_color(&mut self, color: Color) -> &mut Self {
        self.edit(|rule| rule.font_color = Some(color.to_string()))
    }

    pub fn using_back_color(&mut self, color: Color) -> &mut Self {
        self.edit(|rule| rule.back_color = Some(color.to_string()))
    }

    pub fn using_font_style(&mut self, style: FontStyle) -> &mut Self {
        self.edit(|rule| rule.font_style = Some(style))
    }

    pub fn having_priority(&mut self, priority: i32) -> &mut Self {
        self.edit(|rule| rule.priority = priority)
    }

    pub fn is_visible(&mut self) -> &mut Self {
        self.edit(|rule| rule.visibility = Some(ViewItemVisibility::Show))
    }

    pub fn is_visible_as_empty_space(&mut self) -> &mut Self {
        self.edit(|rule| rule.visibility = Some(ViewItemVisibility::ShowEmptySpace))
    }

    pub fn is_not_visible(&mut self) -> &mut Self {
        self.edit(|rule| rule.visibility = Some(ViewItemVisibility::Hide))
    }

    pub fn is_enabled(&mut self) -> &mut Self {
        self.edit(|rule| rule.enabled = Some(true))
    }

    pub fn is_not_enabled(&mut self) -> &mut Self {
        self.edit(|rule| rule.enabled = Some(false))
    }

    /// Condition under which the rule applies. Takes raw criteria text or a
    /// structured [`Criteria`].
    pub fn when(&mut self, criteria: impl Into<Criteria>) -> &mut Self {
        let rendered = criteria.into().to_string();
        self.edit(|rule| rule.criteria = Some(rendered))
    }

    // -----------------------------------------------------------------------
    // Accumulated fields
    // -----------------------------------------------------------------------

    pub fn for_items_of_type(&mut self, item_type: impl fmt::Display) -> &mut Self {
        self.item_types.push(item_type.to_string());
        self
    }

    pub fn for_item_types<I>(&mut self, item_types: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        for item_type in item_types {
            self.for_items_of_type(item_type);
        }
        self
    }

    pub fn for_layout_items(&mut self) -> &mut Self {
        self.for_items_of_type(AppearanceItemType::LayoutItem)
    }

    pub fn for_view_items(&mut self) -> &mut Self {
        self.for_items_of_type(AppearanceItemType::ViewItem)
    }

    pub fn for_actions(&mut self) -> &mut Self {
        self.for_items_of_type(AppearanceItemType::Action)
    }

    pub fn in_the_context_of(&mut self, context: impl fmt::Display) -> &mut Self {
        self.contexts.push(context.to_string());
        self
    }

    pub fn in_any_context(&mut self) -> &mut Self {
        self.in_the_context_of(ViewType::Any)
    }

    pub fn in_detail_view_context(&mut self) -> &mut Self {
        self.in_the_context_of(ViewType::DetailView)
    }

    pub fn in_list_view_context(&mut self) -> &mut Self {
        self.in_the_context_of(ViewType::ListView)
    }

    pub fn targeting(&mut self, target: &str) -> &mut Self {
        self.targets.push(target);
        self
    }

    pub fn targeting_member<Q>(&mut self, selector: MemberSelector<T, Q>) -> Result<&mut Self, ModelError> {
        let name = self.resolver.resolve(&selector)?;
        Ok(self.targeting(&name))
    }

    pub fn targeting_all(&mut self) -> &mut Self {
        self.targeting(ALL_TARGETS)
    }

    /// Exclusions share the target list; consumers read them relative to a
    /// preceding wildcard.
    pub fn except_target(&mut self, target: &str) -> &mut Self {
        self.targeting(target)
    }

    pub fn except_member<Q>(&mut self, selector: MemberSelector<T, Q>) -> Result<&mut Self, ModelError> {
        self.targeting_member(selector)
    }
}

impl<T: ModelType> BuilderManager for AppearanceBuilder<T> {
    fn builder_set(&mut self) -> &mut BuilderSet {
        &mut self.children
    }
}

impl<T: ModelType> Builder for AppearanceBuilder<T> {
    fn build(&mut self) {
        self.children.build_all();

        let item_types = self.item_types.materialize();
        let contexts = self.contexts.materialize();
        let targets = self.targets.materialize();
        tracing::debug!(
            member = %self.member,
            item_types = ?item_types,
            contexts = ?contexts,
            targets = ?targets,
            "finalizing appearance rule"
        );

        self.edit(|rule| {
            if let Some(item_types) = item_types {
                rule.appearance_item_type = item_types;
            }
            if let Some(contexts) = contexts {
                rule.context = contexts;
            }
            if targets.is_some() {
                rule.target_items = targets;
            }
        });
    }

    fn builders(&self) -> &[BoxedBuilder] {
        self.children.as_slice()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T> fmt::Debug for AppearanceBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppearanceBuilder")
            .field("member", &self.member)
            .field("item_types", &self.item_types)
            .field("contexts", &self.contexts)
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}
