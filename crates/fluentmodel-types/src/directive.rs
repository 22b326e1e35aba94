//! Directive catalog and the shared handle directives are attached through.
//!
//! A directive is one configuration unit written onto a type or member
//! descriptor. Most directives are written once and never touched again. The
//! appearance rule is the exception: its feature builder attaches it eagerly
//! and keeps mutating the same object until finalize, which is why the
//! registry stores [`SharedDirective`] handles rather than plain values.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::appearance::AppearanceRule;

/// One configuration unit attached to a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Key/value default applied to the descriptor's model node.
    ModelDefault(ModelDefault),
    VisibleInDetailView { visible: bool },
    VisibleInListView { visible: bool },
    VisibleInLookupListView { visible: bool },
    ImageName { image: String },
    DefaultProperty { member: String },
    ObjectCaptionFormat { format: String },
    ImmediatePostData,
    DataSourceProperty {
        property: String,
        null_mode: DataSourceNullMode,
        null_criteria: String,
    },
    DataSourceCriteriaProperty { property: String },
    DataSourceCriteria { criteria: String },
    Appearance(AppearanceRule),
    /// Open-ended directive for kinds outside the built-in catalog.
    Custom(CustomDirective),
}

impl Directive {
    /// Short kind name, used in logs and CLI output.
    pub fn kind(&self) -> &str {
        match self {
            Directive::ModelDefault(_) => "model_default",
            Directive::VisibleInDetailView { .. } => "visible_in_detail_view",
            Directive::VisibleInListView { .. } => "visible_in_list_view",
            Directive::VisibleInLookupListView { .. } => "visible_in_lookup_list_view",
            Directive::ImageName { .. } => "image_name",
            Directive::DefaultProperty { .. } => "default_property",
            Directive::ObjectCaptionFormat { .. } => "object_caption_format",
            Directive::ImmediatePostData => "immediate_post_data",
            Directive::DataSourceProperty { .. } => "data_source_property",
            Directive::DataSourceCriteriaProperty { .. } => "data_source_criteria_property",
            Directive::DataSourceCriteria { .. } => "data_source_criteria",
            Directive::Appearance(_) => "appearance",
            Directive::Custom(custom) => &custom.name,
        }
    }

    /// The model default carried by this directive, if it is one.
    pub fn as_model_default(&self) -> Option<&ModelDefault> {
        match self {
            Directive::ModelDefault(default) => Some(default),
            _ => None,
        }
    }

    /// The appearance rule carried by this directive, if it is one.
    pub fn as_appearance(&self) -> Option<&AppearanceRule> {
        match self {
            Directive::Appearance(rule) => Some(rule),
            _ => None,
        }
    }
}

/// A `(property, value)` pair written as a model default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDefault {
    pub property: String,
    pub value: String,
}

impl ModelDefault {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl From<ModelDefault> for Directive {
    fn from(default: ModelDefault) -> Self {
        Directive::ModelDefault(default)
    }
}

/// A named bag of string fields for directive kinds the catalog does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDirective {
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl CustomDirective {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

impl From<CustomDirective> for Directive {
    fn from(custom: CustomDirective) -> Self {
        Directive::Custom(custom)
    }
}

impl From<AppearanceRule> for Directive {
    fn from(rule: AppearanceRule) -> Self {
        Directive::Appearance(rule)
    }
}

/// What a data-source-bound lookup shows when its source property is null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceNullMode {
    SelectNothing,
    SelectAll,
    CustomCriteria,
}

impl Default for DataSourceNullMode {
    fn default() -> Self {
        DataSourceNullMode::SelectNothing
    }
}

impl fmt::Display for DataSourceNullMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceNullMode::SelectNothing => write!(f, "SelectNothing"),
            DataSourceNullMode::SelectAll => write!(f, "SelectAll"),
            DataSourceNullMode::CustomCriteria => write!(f, "CustomCriteria"),
        }
    }
}

/// Reference-counted handle to a directive attached to a registry.
///
/// Cloning the handle shares the directive. Readers take a [`snapshot`]; the
/// owning builder mutates through [`update`].
///
/// [`snapshot`]: SharedDirective::snapshot
/// [`update`]: SharedDirective::update
#[derive(Debug, Clone)]
pub struct SharedDirective(Rc<RefCell<Directive>>);

impl SharedDirective {
    pub fn new(directive: Directive) -> Self {
        Self(Rc::new(RefCell::new(directive)))
    }

    /// Copy of the directive's current state.
    pub fn snapshot(&self) -> Directive {
        self.0.borrow().clone()
    }

    /// Mutate the directive in place.
    pub fn update<R>(&self, f: impl FnOnce(&mut Directive) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Kind name of the current directive.
    pub fn kind(&self) -> String {
        self.0.borrow().kind().to_string()
    }

    /// Whether both handles point at the same directive.
    pub fn ptr_eq(&self, other: &SharedDirective) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Directive> for SharedDirective {
    fn from(directive: Directive) -> Self {
        SharedDirective::new(directive)
    }
}
