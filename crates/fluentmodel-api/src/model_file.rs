//! Declarative model files consumed by `fmb assemble`.
//!
//! A model file carries its own catalog (`[[types]]`) plus one `[[model]]`
//! table per type builder. Each table is replayed through the same fluent
//! builder calls a Rust model definition would make:
//!
//! ```toml
//! [[types]]
//! name = "sales.Order"
//! members = ["Total", "Status", "IsCancelled"]
//!
//! [[model]]
//! type = "sales.Order"
//! caption = "Orders"
//! allow = "nothing"
//!
//! [[model.members]]
//! name = "Total"
//! display_format = "{0:C}"
//!
//! [[model.members.appearance]]
//! item_types = ["LayoutItem", "Action"]
//! targets = ["Status"]
//! criteria = "IsCancelled=true"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use fluentmodel_core::prelude::*;
use fluentmodel_infra::catalog::{Catalog, TypeDeclaration};
use fluentmodel_types::appearance::ViewItemVisibility;
use fluentmodel_types::descriptor::TypeIdentity;

/// Stand-in owner type for builders driven by a model file.
///
/// Model-file types are only known at runtime, so their builders are always
/// created through [`TypeBuilder::from_descriptor`] and never read `FULL_NAME`.
pub struct DeclaredType;

impl ModelType for DeclaredType {
    const FULL_NAME: &'static str = "";
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,

    #[serde(default)]
    pub model: Vec<TypeModel>,
}

/// Permission shorthand for a whole type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowMode {
    Nothing,
    Everything,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeModel {
    #[serde(rename = "type")]
    pub type_name: String,
    pub caption: Option<String>,
    pub image: Option<String>,
    pub default_member: Option<String>,
    pub object_caption_format: Option<String>,
    pub allow: Option<AllowMode>,
    pub allow_edit: Option<bool>,
    pub allow_new: Option<bool>,
    pub allow_delete: Option<bool>,
    #[serde(default)]
    pub model_defaults: BTreeMap<String, String>,
    #[serde(default)]
    pub members: Vec<MemberModel>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberModel {
    pub name: String,
    pub caption: Option<String>,
    pub display_format: Option<String>,
    pub visible_in_any_view: Option<bool>,
    pub visible_in_detail_view: Option<bool>,
    pub visible_in_list_view: Option<bool>,
    pub visible_in_lookup_list_view: Option<bool>,
    pub property_editor: Option<String>,
    #[serde(default)]
    pub immediate_post_data: bool,
    pub edit_mask: Option<String>,
    pub regex_edit_mask: Option<String>,
    pub data_source: Option<DataSourceModel>,
    pub allow: Option<AllowMode>,
    pub allow_edit: Option<bool>,
    pub allow_new: Option<bool>,
    pub allow_delete: Option<bool>,
    #[serde(default)]
    pub model_defaults: BTreeMap<String, String>,
    #[serde(default)]
    pub appearance: Vec<AppearanceModel>,
}

/// Shorthands shared by type and member tables.
struct Shorthands<'a> {
    caption: Option<&'a str>,
    allow: Option<AllowMode>,
    allow_edit: Option<bool>,
    allow_new: Option<bool>,
    allow_delete: Option<bool>,
    model_defaults: &'a BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSourceModel {
    pub property: Option<String>,
    #[serde(default)]
    pub null_mode: DataSourceNullMode,
    pub null_criteria: Option<String>,
    pub criteria_property: Option<String>,
    pub criteria: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppearanceModel {
    pub discriminator: Option<String>,
    pub criteria: Option<String>,
    pub priority: Option<i32>,
    pub font_color: Option<String>,
    pub back_color: Option<String>,
    /// Flag text such as `"BOLD | ITALIC"`.
    pub font_style: Option<FontStyle>,
    pub visibility: Option<ViewItemVisibility>,
    pub enabled: Option<bool>,
    #[serde(default)]
    pub item_types: Vec<String>,
    #[serde(default)]
    pub contexts: Vec<String>,
    #[serde(default)]
    pub target_all: bool,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub except: Vec<String>,
}

impl ModelFile {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse model file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid model file {}", path.display()))
    }

    /// The `[[types]]` tables as a validated catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let catalog = Catalog {
            types: self.types.clone(),
        };
        catalog.validate()?;
        Ok(catalog)
    }
}

// ---------------------------------------------------------------------------
// Replaying a model table through the builders
// ---------------------------------------------------------------------------

impl TypeModel {
    /// Construct the type builder this table describes.
    pub fn build(&self, ctx: &ModelContext) -> Result<BoxedBuilder, ModelError> {
        let descriptor = ctx.registry().find_type(&TypeIdentity::new(&self.type_name))?;
        let mut builder = TypeBuilder::<DeclaredType>::from_descriptor(ctx, descriptor)?;

        apply_shorthands(&mut builder, self.shorthands());
        if let Some(image) = &self.image {
            builder.has_image(image);
        }
        if let Some(member) = &self.default_member {
            builder.has_default_member_named(member);
        }
        if let Some(format) = &self.object_caption_format {
            builder.has_object_caption_format(format);
        }

        for member in &self.members {
            member.apply(builder.for_member_named(&member.name)?)?;
        }

        Ok(builder.boxed())
    }

    fn shorthands(&self) -> Shorthands<'_> {
        Shorthands {
            caption: self.caption.as_deref(),
            allow: self.allow,
            allow_edit: self.allow_edit,
            allow_new: self.allow_new,
            allow_delete: self.allow_delete,
            model_defaults: &self.model_defaults,
        }
    }
}

impl MemberModel {
    fn apply(&self, builder: &mut MemberBuilder<DeclaredType>) -> Result<(), ModelError> {
        if self.edit_mask.is_some() && self.regex_edit_mask.is_some() {
            return Err(ModelError::Definition(format!(
                "member '{}' sets both edit_mask and regex_edit_mask",
                builder.descriptor()
            )));
        }

        apply_shorthands(builder, self.shorthands());

        if let Some(format) = &self.display_format {
            builder.has_display_format(format);
        }
        if let Some(visible) = self.visible_in_any_view {
            builder.is_visible_in_any_view(visible);
        }
        if let Some(visible) = self.visible_in_detail_view {
            builder.is_visible_in_detail_view(visible);
        }
        if let Some(visible) = self.visible_in_list_view {
            builder.is_visible_in_list_view(visible);
        }
        if let Some(visible) = self.visible_in_lookup_list_view {
            builder.is_visible_in_lookup_list_view(visible);
        }
        if let Some(editor) = &self.property_editor {
            builder.using_property_editor(editor);
        }
        if self.immediate_post_data {
            builder.is_immediate_post_data();
        }
        if let Some(mask) = &self.edit_mask {
            builder.has_edit_mask(mask);
        }
        if let Some(regex) = &self.regex_edit_mask {
            builder.has_regex_edit_mask(regex);
        }
        if let Some(data_source) = &self.data_source {
            data_source.apply(builder);
        }

        for appearance in &self.appearance {
            appearance.apply(builder);
        }
        Ok(())
    }

    fn shorthands(&self) -> Shorthands<'_> {
        Shorthands {
            caption: self.caption.as_deref(),
            allow: self.allow,
            allow_edit: self.allow_edit,
            allow_new: self.allow_new,
            allow_delete: self.allow_delete,
            model_defaults: &self.model_defaults,
        }
    }
}

impl DataSourceModel {
    fn apply(&self, builder: &mut MemberBuilder<DeclaredType>) {
        if let Some(property) = &self.property {
            let null_criteria = self.null_criteria.as_deref().map(Criteria::from);
            builder.using_data_source_property(property, self.null_mode, null_criteria);
        }
        if let Some(property) = &self.criteria_property {
            builder.using_data_source_criteria_property(property);
        }
        if let Some(criteria) = &self.criteria {
            builder.using_data_source_criteria(criteria.as_str());
        }
    }
}

impl AppearanceModel {
    fn apply(&self, member: &mut MemberBuilder<DeclaredType>) {
        let rule = match &self.discriminator {
            Some(discriminator) => member.with_appearance_as(discriminator),
            None => member.with_appearance(),
        };

        if let Some(criteria) = &self.criteria {
            rule.when(criteria.as_str());
        }
        if let Some(priority) = self.priority {
            rule.having_priority(priority);
        }
        if let Some(color) = &self.font_color {
            rule.using_fore_color(Color::named(color));
        }
        if let Some(color) = &self.back_color {
            rule.using_back_color(Color::named(color));
        }
        if let Some(style) = self.font_style {
            rule.using_font_style(style);
        }
        match self.visibility {
            Some(ViewItemVisibility::Show) => {
                rule.is_visible();
            }
            Some(ViewItemVisibility::Hide) => {
                rule.is_not_visible();
            }
            Some(ViewItemVisibility::ShowEmptySpace) => {
                rule.is_visible_as_empty_space();
            }
            None => {}
        }
        match self.enabled {
            Some(true) => {
                rule.is_enabled();
            }
            Some(false) => {
                rule.is_not_enabled();
            }
            None => {}
        }

        rule.for_item_types(&self.item_types);
        for context in &self.contexts {
            rule.in_the_context_of(context);
        }
        if self.target_all {
            rule.targeting_all();
        }
        for target in &self.targets {
            rule.targeting(target);
        }
        for target in &self.except {
            rule.except_target(target);
        }
    }
}

fn apply_shorthands<B: DirectiveSink>(builder: &mut B, shorthands: Shorthands<'_>) {
    if let Some(caption) = shorthands.caption {
        builder.has_caption(caption);
    }
    match shorthands.allow {
        Some(AllowMode::Nothing) => {
            builder.allowing_nothing();
        }
        Some(AllowMode::Everything) => {
            builder.allowing_everything();
        }
        None => {}
    }
    match shorthands.allow_edit {
        Some(true) => {
            builder.allowing_edit();
        }
        Some(false) => {
            builder.not_allowing_edit();
        }
        None => {}
    }
    match shorthands.allow_new {
        Some(true) => {
            builder.allowing_new();
        }
        Some(false) => {
            builder.not_allowing_new();
        }
        None => {}
    }
    match shorthands.allow_delete {
        Some(true) => {
            builder.allowing_delete();
        }
        Some(false) => {
            builder.not_allowing_delete();
        }
        None => {}
    }
    for (key, value) in shorthands.model_defaults {
        builder.with_model_default(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::rc::Rc;

    use fluentmodel_infra::registry::InMemoryRegistry;
    use fluentmodel_types::descriptor::{DirectiveTarget, MemberDescriptor, TypeDescriptor};
    use fluentmodel_types::directive::ModelDefault;

    const MODEL: &str = r#"
[[types]]
name = "sales.Order"
members = ["Total", "Status", "IsCancelled", "Customer"]

[[model]]
type = "sales.Order"
caption = "Orders"
allow = "nothing"
object_caption_format = "{0:Status}"

[[model.members]]
name = "Total"
display_format = "{0:C}"
edit_mask = "n2"

[[model.members.appearance]]
item_types = ["LayoutItem", "Action"]
targets = ["Status"]
criteria = "IsCancelled=true"
font_style = "BOLD | ITALIC"
visibility = "hide"

[[model.members]]
name = "Customer"
visible_in_any_view = false

[model.members.data_source]
property = "AvailableCustomers"
null_mode = "select_all"
"#;

    fn assemble(model: &ModelFile) -> Rc<InMemoryRegistry> {
        let registry = Rc::new(model.catalog().unwrap().into_registry().unwrap());
        let ctx = ModelContext::new(registry.clone());
        ModelAssembler::new(ctx.clone())
            .assemble_iter(model.model.iter().map(|table| table.build(&ctx)))
            .unwrap();
        registry
    }

    #[test]
    fn test_parse_model_file() {
        let model = ModelFile::from_toml(MODEL).unwrap();
        assert_eq!(model.types.len(), 1);
        assert_eq!(model.model.len(), 1);
        assert_eq!(model.model[0].caption.as_deref(), Some("Orders"));
        assert_eq!(model.model[0].allow, Some(AllowMode::Nothing));
        assert_eq!(model.model[0].members.len(), 2);
        assert_eq!(
            model.model[0].members[0].appearance[0].font_style,
            Some(FontStyle::BOLD | FontStyle::ITALIC)
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = ModelFile::from_toml(
            r#"
[[model]]
type = "Order"

[[model.members]]
name = "Total"

[[model.members.appearance]]
colour = "Red"
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("colour"));
    }

    #[test]
    fn test_mistyped_type_key_is_rejected() {
        let err = ModelFile::from_toml("[[model]]\ntype = \"Order\"\ncaptoin = \"Orders\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("captoin"));
    }

    #[test]
    fn test_mistyped_member_key_is_rejected() {
        let err = ModelFile::from_toml(
            r#"
[[model]]
type = "Order"

[[model.members]]
name = "Total"
dispaly_format = "{0:C}"
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("dispaly_format"));
    }

    #[test]
    fn test_member_shorthands_are_applied() {
        let model = ModelFile::from_toml(
            r#"
[[types]]
name = "Order"
members = ["Total"]

[[model]]
type = "Order"

[[model.members]]
name = "Total"
caption = "Gross"
allow_edit = false

[model.members.model_defaults]
Tooltip = "Gross amount"
"#,
        )
        .unwrap();
        let registry = assemble(&model);

        let order = TypeDescriptor::new("Order");
        let total = MemberDescriptor::new(&order, "Total");
        assert_eq!(
            registry.directives_on(DirectiveTarget::Member(&total)),
            vec![
                Directive::from(ModelDefault::new("Caption", "Gross")),
                Directive::from(ModelDefault::new("AllowEdit", "false")),
                Directive::from(ModelDefault::new("Tooltip", "Gross amount")),
            ]
        );
    }

    #[test]
    fn test_conflicting_masks_are_a_definition_error() {
        let model = ModelFile::from_toml(
            r#"
[[types]]
name = "Order"
members = ["Status"]

[[model]]
type = "Order"

[[model.members]]
name = "Status"
edit_mask = "n2"
regex_edit_mask = "[A-Z]+"
"#,
        )
        .unwrap();
        let registry = Rc::new(model.catalog().unwrap().into_registry().unwrap());
        let ctx = ModelContext::new(registry);

        let Err(err) = model.model[0].build(&ctx) else {
            panic!("conflicting masks must fail the build");
        };
        assert_eq!(
            err,
            ModelError::Definition("member 'Order.Status' sets both edit_mask and regex_edit_mask".to_string())
        );
    }

    #[test]
    fn test_replay_writes_directives_and_finalizes_rules() {
        let model = ModelFile::from_toml(MODEL).unwrap();
        let registry = assemble(&model);

        let view = registry.view("sales.Order").unwrap();
        assert_eq!(view.directives.len(), 5);
        assert!(view.directives.contains(&Directive::from(ModelDefault::new("AllowEdit", "false"))));

        let rule = view.members[0]
            .directives
            .iter()
            .find_map(Directive::as_appearance)
            .unwrap();
        assert_eq!(rule.id, "sales.Order.Total.Visibility");
        assert_eq!(rule.appearance_item_type, "LayoutItem;Action");
        assert_eq!(rule.target_items.as_deref(), Some("Status"));
        assert_eq!(rule.visibility, Some(ViewItemVisibility::Hide));
    }

    #[test]
    fn test_visible_in_any_view_and_data_source() {
        let model = ModelFile::from_toml(MODEL).unwrap();
        let registry = assemble(&model);

        let order = TypeDescriptor::new("sales.Order");
        let customer = MemberDescriptor::new(&order, "Customer");
        let written = registry.directives_on(DirectiveTarget::Member(&customer));
        assert_eq!(written.len(), 4);
        assert!(written.contains(&Directive::VisibleInLookupListView { visible: false }));
        assert!(written.contains(&Directive::DataSourceProperty {
            property: "AvailableCustomers".to_string(),
            null_mode: DataSourceNullMode::SelectAll,
            null_criteria: String::new(),
        }));
    }

    #[test]
    fn test_unknown_member_fails_the_build() {
        let model = ModelFile::from_toml(
            r#"
[[types]]
name = "Order"
members = ["Total"]

[[model]]
type = "Order"

[[model.members]]
name = "Totl"
"#,
        )
        .unwrap();
        let registry = Rc::new(model.catalog().unwrap().into_registry().unwrap());
        let ctx = ModelContext::new(registry.clone());

        let Err(err) = model.model[0].build(&ctx) else {
            panic!("unknown member must fail the build");
        };
        assert!(matches!(err, ModelError::Registry(_)));
        assert_eq!(registry.refresh_count("Order"), 0);
    }

    #[test]
    fn test_duplicate_catalog_types_are_rejected() {
        let model = ModelFile::from_toml(
            r#"
[[types]]
name = "Order"

[[types]]
name = "Order"
"#,
        )
        .unwrap();
        assert!(model.catalog().is_err());
    }
}
