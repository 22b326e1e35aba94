//! Data-source bindings for lookup members.

use fluentmodel_types::criteria::Criteria;
use fluentmodel_types::directive::{DataSourceNullMode, Directive};
use fluentmodel_types::error::ModelError;

use crate::builder::{DirectiveSink, MemberBuilder};
use crate::context::ModelType;
use crate::resolver::MemberSelector;

pub trait DataSourceExt<T> {
    /// Fill the lookup from the collection property `property` of the owner.
    /// `null_criteria` only matters with [`DataSourceNullMode::CustomCriteria`].
    fn using_data_source_property(
        &mut self,
        property: &str,
        null_mode: DataSourceNullMode,
        null_criteria: Option<Criteria>,
    ) -> &mut Self;

    fn using_data_source_property_member<Q>(
        &mut self,
        selector: MemberSelector<T, Q>,
        null_mode: DataSourceNullMode,
        null_criteria: Option<Criteria>,
    ) -> Result<&mut Self, ModelError>;

    /// Filter the lookup with the criteria held by the owner's `property`.
    fn using_data_source_criteria_property(&mut self, property: &str) -> &mut Self;

    fn using_data_source_criteria_property_member<Q>(
        &mut self,
        selector: MemberSelector<T, Q>,
    ) -> Result<&mut Self, ModelError>;

    /// Filter the lookup with fixed criteria.
    fn using_data_source_criteria(&mut self, criteria: impl Into<Criteria>) -> &mut Self;
}

impl<T: ModelType, P: 'static> DataSourceExt<T> for MemberBuilder<T, P> {
    fn using_data_source_property(
        &mut self,
        property: &str,
        null_mode: DataSourceNullMode,
        null_criteria: Option<Criteria>,
    ) -> &mut Self {
        self.with_directive(Directive::DataSourceProperty {
            property: property.to_string(),
            null_mode,
            null_criteria: null_criteria.map(|c| c.to_string()).unwrap_or_default(),
        })
    }

    fn using_data_source_property_member<Q>(
        &mut self,
        selector: MemberSelector<T, Q>,
        null_mode: DataSourceNullMode,
        null_criteria: Option<Criteria>,
    ) -> Result<&mut Self, ModelError> {
        let property = self.resolve(&selector)?;
        Ok(self.using_data_source_property(&property, null_mode, null_criteria))
    }

    fn using_data_source_criteria_property(&mut self, property: &str) -> &mut Self {
        self.with_directive(Directive::DataSourceCriteriaProperty {
            property: property.to_string(),
        })
    }

    fn using_data_source_criteria_property_member<Q>(
        &mut self,
        selector: MemberSelector<T, Q>,
    ) -> Result<&mut Self, ModelError> {
        let property = self.resolve(&selector)?;
        Ok(self.using_data_source_criteria_property(&property))
    }

    fn using_data_source_criteria(&mut self, criteria: impl Into<Criteria>) -> &mut Self {
        self.with_directive(Directive::DataSourceCriteria {
            criteria: criteria.into().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::rc::Rc;

    use crate::builder::TypeBuilder;
    use crate::context::ModelContext;
    use crate::member;
    use crate::test_support::{Order, RecordingRegistry};

    #[test]
    fn test_data_source_directives() {
        let registry = Rc::new(RecordingRegistry::sample());
        let ctx = ModelContext::new(registry.clone());
        let mut order = TypeBuilder::<Order>::new(&ctx).unwrap();

        order
            .for_member(member!(Order => customer))
            .unwrap()
            .using_data_source_property_member(
                member!(Order => note),
                DataSourceNullMode::CustomCriteria,
                Some(Criteria::equals("IsActive", true)),
            )
            .unwrap()
            .using_data_source_criteria_property("CustomerFilter")
            .using_data_source_criteria("[Region] = 'EU'");

        assert_eq!(
            registry.member_directives("Order", "Customer"),
            vec![
                Directive::DataSourceProperty {
                    property: "Note".to_string(),
                    null_mode: DataSourceNullMode::CustomCriteria,
                    null_criteria: "[IsActive] = True".to_string(),
                },
                Directive::DataSourceCriteriaProperty {
                    property: "CustomerFilter".to_string(),
                },
                Directive::DataSourceCriteria {
                    criteria: "[Region] = 'EU'".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_absent_null_criteria_is_empty_text() {
        let registry = Rc::new(RecordingRegistry::sample());
        let ctx = ModelContext::new(registry.clone());
        let mut order = TypeBuilder::<Order>::new(&ctx).unwrap();

        order
            .for_member_named("Customer")
            .unwrap()
            .using_data_source_property("Customers", DataSourceNullMode::default(), None);

        let written = registry.member_directives("Order", "Customer");
        assert!(matches!(
            &written[0],
            Directive::DataSourceProperty { null_mode: DataSourceNullMode::SelectNothing, null_criteria, .. }
                if null_criteria.is_empty()
        ));
    }

    #[test]
    fn test_criteria_property_selector_must_be_member_access() {
        let registry = Rc::new(RecordingRegistry::sample());
        let ctx = ModelContext::new(registry);
        let mut order = TypeBuilder::<Order>::new(&ctx).unwrap();

        let result = order
            .for_member(member!(Order => customer))
            .unwrap()
            .using_data_source_criteria_property_member(member!(Order => note.len()));
        assert!(matches!(result, Err(ModelError::Selector(_))));
    }
}
