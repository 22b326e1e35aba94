//! Everything a model definition usually needs in scope.

pub use crate::assembler::{Assembly, ModelAssembler, ModelDefinition};
pub use crate::builder::{
    BoxedBuilder, Builder, BuilderManager, DirectiveSink, MemberBuilder, TypeBuilder,
};
pub use crate::context::{ModelContext, ModelType};
pub use crate::feature::{AppearanceBuilder, AppearanceExt, DataSourceExt, EditMaskExt, RegexEditMaskExt};
pub use crate::member;
pub use crate::registry::DescriptorRegistry;
pub use crate::resolver::{MemberSelector, Untyped};

pub use fluentmodel_types::appearance::{AppearanceItemType, Color, FontStyle, ViewType};
pub use fluentmodel_types::criteria::Criteria;
pub use fluentmodel_types::directive::{DataSourceNullMode, Directive};
pub use fluentmodel_types::error::ModelError;
