//! Immediate-write shorthands shared by type and member builders.

use fluentmodel_types::directive::{Directive, ModelDefault, SharedDirective};

/// Model default keys written by the built-in shorthands.
pub mod keys {
    pub const CAPTION: &str = "Caption";
    pub const DISPLAY_FORMAT: &str = "DisplayFormat";
    pub const PROPERTY_EDITOR_TYPE: &str = "PropertyEditorType";
    pub const EDIT_MASK: &str = "EditMask";
    pub const EDIT_MASK_TYPE: &str = "EditMaskType";
    pub const ALLOW_EDIT: &str = "AllowEdit";
    pub const ALLOW_NEW: &str = "AllowNew";
    pub const ALLOW_DELETE: &str = "AllowDelete";

    /// `EditMaskType` value for regular-expression masks.
    pub const REGEX_MASK_TYPE: &str = "RegEx";
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// A builder that writes directives straight onto its descriptor.
///
/// Implementors supply [`attach`](DirectiveSink::attach); every other method
/// is a chainable shorthand on top of it.
pub trait DirectiveSink {
    /// Attach a directive to the descriptor this builder targets.
    fn attach(&mut self, directive: SharedDirective);

    fn with_directive(&mut self, directive: impl Into<Directive>) -> &mut Self
    where
        Self: Sized,
    {
        self.attach(SharedDirective::new(directive.into()));
        self
    }

    /// Create a `K` from its default, let `configure` fill it in, attach it.
    fn with_directive_of<K>(&mut self, configure: impl FnOnce(&mut K)) -> &mut Self
    where
        K: Default + Into<Directive>,
        Self: Sized,
    {
        let mut directive = K::default();
        configure(&mut directive);
        self.with_directive(directive)
    }

    fn with_model_default(&mut self, property: &str, value: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.with_directive(ModelDefault::new(property, value))
    }

    fn has_caption(&mut self, caption: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.with_model_default(keys::CAPTION, caption)
    }

    fn allowing_edit(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.with_model_default(keys::ALLOW_EDIT, flag(true))
    }

    fn not_allowing_edit(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.with_model_default(keys::ALLOW_EDIT, flag(false))
    }

    fn allowing_new(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.with_model_default(keys::ALLOW_NEW, flag(true))
    }

    fn not_allowing_new(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.with_model_default(keys::ALLOW_NEW, flag(false))
    }

    fn allowing_delete(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.with_model_default(keys::ALLOW_DELETE, flag(true))
    }

    fn not_allowing_delete(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.with_model_default(keys::ALLOW_DELETE, flag(false))
    }

    fn allowing_nothing(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.not_allowing_delete().not_allowing_edit().not_allowing_new()
    }

    fn allowing_everything(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.allowing_delete().allowing_edit().allowing_new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fluentmodel_types::directive::CustomDirective;

    #[derive(Default)]
    struct Collect {
        attached: Vec<Directive>,
    }

    impl DirectiveSink for Collect {
        fn attach(&mut self, directive: SharedDirective) {
            self.attached.push(directive.snapshot());
        }
    }

    fn defaults(sink: &Collect) -> Vec<(String, String)> {
        sink.attached
            .iter()
            .filter_map(Directive::as_model_default)
            .map(|d| (d.property.clone(), d.value.clone()))
            .collect()
    }

    #[test]
    fn test_allowing_nothing_writes_three_false_defaults() {
        let mut sink = Collect::default();
        sink.allowing_nothing();

        let written = defaults(&sink);
        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|(_, value)| value == "false"));
        assert!(written.iter().any(|(key, _)| key == keys::ALLOW_NEW));
    }

    #[test]
    fn test_shorthands_chain() {
        let mut sink = Collect::default();
        sink.has_caption("Orders").allowing_edit().with_model_default("Tooltip", "x");

        assert_eq!(
            defaults(&sink),
            vec![
                ("Caption".to_string(), "Orders".to_string()),
                ("AllowEdit".to_string(), "true".to_string()),
                ("Tooltip".to_string(), "x".to_string()),
            ]
        );
    }

    #[test]
    fn test_with_directive_of_configures_default_instance() {
        let mut sink = Collect::default();
        sink.with_directive_of::<CustomDirective>(|custom| {
            custom.name = "Tooltip".to_string();
            custom.fields.insert("text".to_string(), "Gross".to_string());
        });

        assert_eq!(sink.attached.len(), 1);
        assert_eq!(sink.attached[0].kind(), "Tooltip");
    }
}
