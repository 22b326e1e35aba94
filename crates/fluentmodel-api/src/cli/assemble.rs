//! `fmb assemble` and `fmb check`.
//!
//! Both load a model file, seed an in-memory registry from its catalog, and
//! run the assembler over its `[[model]]` tables. `assemble` then prints the
//! refreshed type views; `check` only reports that the model is sound.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use fluentmodel_core::prelude::*;
use fluentmodel_infra::catalog::Catalog;
use fluentmodel_infra::config::{load_engine_config, load_engine_config_in};
use fluentmodel_infra::registry::{InMemoryRegistry, TypeView};
use fluentmodel_observe::attrs;
use fluentmodel_types::appearance::AppearanceRule;
use fluentmodel_types::config::EngineConfig;
use fluentmodel_types::descriptor::TypeDescriptor;

use crate::model_file::ModelFile;

/// Result of one assembly run over a model file.
pub struct Outcome {
    pub registry: Rc<InMemoryRegistry>,
    pub builders: usize,
    pub refreshed: Vec<TypeDescriptor>,
}

impl Outcome {
    /// Views of every refreshed type, sorted by name.
    pub fn views(&self) -> Vec<TypeView> {
        self.registry.views()
    }
}

/// Load, seed, and assemble `model_path`.
///
/// Types from an external `catalog_path` are declared alongside the model
/// file's own `[[types]]`; a type declared in both is an error.
pub fn run(model_path: &Path, config_path: Option<&Path>, catalog_path: Option<&Path>) -> Result<Outcome> {
    let span = tracing::info_span!(
        attrs::SPAN_ASSEMBLE,
        model.file = tracing::field::Empty,
        model.types = tracing::field::Empty,
        model.assembly.builders = tracing::field::Empty,
        model.assembly.refreshed = tracing::field::Empty,
        model.assembly.refresh_policy = tracing::field::Empty,
    );
    let _enter = span.enter();
    span.record(attrs::MODEL_FILE, tracing::field::display(model_path.display()));

    let model = ModelFile::load(model_path)?;
    let config = resolve_config(model_path, config_path);
    span.record(
        attrs::ASSEMBLY_REFRESH_POLICY,
        tracing::field::debug(config.refresh_policy),
    );

    let registry = model
        .catalog()?
        .into_registry()
        .context("Failed to seed registry from model catalog")?;
    if let Some(path) = catalog_path {
        Catalog::load(path)?
            .seed(&registry)
            .with_context(|| format!("Failed to seed registry from {}", path.display()))?;
    }
    span.record(attrs::MODEL_TYPES, registry.type_names().len());

    let registry = Rc::new(registry);
    let ctx = ModelContext::with_config(registry.clone(), config);

    let assembly = ModelAssembler::new(ctx.clone())
        .assemble_iter(model.model.iter().map(|table| {
            let table_span = tracing::debug_span!(attrs::SPAN_MODEL_TABLE, "model.type" = tracing::field::Empty);
            table_span.record(attrs::MODEL_TYPE, table.type_name.as_str());
            let _enter = table_span.enter();
            table.build(&ctx)
        }))
        .with_context(|| format!("Failed to assemble {}", model_path.display()))?;

    span.record(attrs::ASSEMBLY_BUILDERS, assembly.builders().len());
    span.record(attrs::ASSEMBLY_REFRESHED, assembly.refreshed().len());

    Ok(Outcome {
        registry,
        builders: assembly.builders().len(),
        refreshed: assembly.refreshed().to_vec(),
    })
}

fn resolve_config(model_path: &Path, config_path: Option<&Path>) -> EngineConfig {
    match config_path {
        Some(path) => load_engine_config(path),
        None => {
            let dir = model_path.parent().unwrap_or_else(|| Path::new("."));
            load_engine_config_in(dir)
        }
    }
}

/// Assemble a model file and print its refreshed type views.
pub fn assemble(
    model_path: &Path,
    config_path: Option<&Path>,
    catalog_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let outcome = run(model_path, config_path, catalog_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(&outcome))?);
        return Ok(());
    }

    for view in outcome.views() {
        println!();
        println!("  {}", style(&view.full_name).cyan().bold());
        println!();
        println!("{}", view_table(&view));
    }
    println!();
    println!(
        "  {} Assembled {} builder(s), refreshed {} type(s)",
        style("ok").green(),
        style(outcome.builders).bold(),
        style(outcome.refreshed.len()).bold(),
    );
    println!();

    Ok(())
}

/// Assemble a model file and report only whether it succeeded.
pub fn check(
    model_path: &Path,
    config_path: Option<&Path>,
    catalog_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let outcome = run(model_path, config_path, catalog_path)?;

    if json {
        let out = serde_json::json!({
            "ok": true,
            "builders": outcome.builders,
            "refreshed": refreshed_names(&outcome),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} is valid ({} type(s))",
        style("ok").green(),
        style(model_path.display()).cyan(),
        outcome.refreshed.len(),
    );
    println!();

    Ok(())
}

fn refreshed_names(outcome: &Outcome) -> Vec<&str> {
    outcome
        .refreshed
        .iter()
        .map(TypeDescriptor::full_name)
        .collect()
}

fn to_json(outcome: &Outcome) -> serde_json::Value {
    serde_json::json!({
        "builders": outcome.builders,
        "refreshed": refreshed_names(outcome),
        "types": outcome.views(),
    })
}

fn view_table(view: &TypeView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Target").fg(Color::White),
            Cell::new("Directive").fg(Color::White),
            Cell::new("Details").fg(Color::White),
        ]);

    for directive in &view.directives {
        table.add_row(vec![
            Cell::new("(type)").fg(Color::DarkGrey),
            Cell::new(directive.kind()),
            Cell::new(describe(directive)),
        ]);
    }
    for member in &view.members {
        for directive in &member.directives {
            table.add_row(vec![
                Cell::new(&member.name).fg(Color::Cyan),
                Cell::new(directive.kind()),
                Cell::new(describe(directive)),
            ]);
        }
    }
    table
}

/// One-line (or, for appearance rules, multi-line) summary of a directive.
pub fn describe(directive: &Directive) -> String {
    match directive {
        Directive::ModelDefault(default) => format!("{} = {}", default.property, default.value),
        Directive::VisibleInDetailView { visible }
        | Directive::VisibleInListView { visible }
        | Directive::VisibleInLookupListView { visible } => visible.to_string(),
        Directive::ImageName { image } => image.clone(),
        Directive::DefaultProperty { member } => member.clone(),
        Directive::ObjectCaptionFormat { format } => format.clone(),
        Directive::ImmediatePostData => String::new(),
        Directive::DataSourceProperty {
            property,
            null_mode,
            null_criteria,
        } if null_criteria.is_empty() => format!("{property} (if null: {null_mode})"),
        Directive::DataSourceProperty {
            property,
            null_mode,
            null_criteria,
        } => format!("{property} (if null: {null_mode} {null_criteria})"),
        Directive::DataSourceCriteriaProperty { property } => property.clone(),
        Directive::DataSourceCriteria { criteria } => criteria.clone(),
        Directive::Appearance(rule) => describe_rule(rule),
        Directive::Custom(custom) => custom
            .fields
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn describe_rule(rule: &AppearanceRule) -> String {
    let mut lines = vec![
        rule.id.clone(),
        format!("items: {}", rule.appearance_item_type),
        format!("context: {}", rule.context),
    ];
    if let Some(targets) = &rule.target_items {
        lines.push(format!("targets: {targets}"));
    }
    if let Some(criteria) = &rule.criteria {
        lines.push(format!("when: {criteria}"));
    }
    if rule.priority != 0 {
        lines.push(format!("priority: {}", rule.priority));
    }
    if let Some(visibility) = rule.visibility {
        lines.push(format!("visibility: {visibility:?}"));
    }
    if let Some(enabled) = rule.enabled {
        lines.push(format!("enabled: {enabled}"));
    }
    if let Some(color) = &rule.font_color {
        lines.push(format!("font color: {color}"));
    }
    if let Some(color) = &rule.back_color {
        lines.push(format!("back color: {color}"));
    }
    if let Some(font_style) = rule.font_style {
        let names: Vec<&str> = font_style.iter_names().map(|(name, _)| name).collect();
        lines.push(format!("font style: {}", names.join(" | ")));
    }
    lines.join("\n")
}
