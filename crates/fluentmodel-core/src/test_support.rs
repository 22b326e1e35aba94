//! Shared fixtures for unit tests: a recording registry and sample types.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use fluentmodel_types::descriptor::{DirectiveTarget, MemberDescriptor, TypeDescriptor, TypeIdentity};
use fluentmodel_types::directive::{Directive, SharedDirective};
use fluentmodel_types::error::{ModelError, RegistryError};

use crate::builder::{DirectiveSink, TypeBuilder};
use crate::context::ModelType;
use crate::registry::DescriptorRegistry;

pub struct Order {
    pub total: f64,
    pub status: String,
    pub is_cancelled: bool,
    pub customer: Option<Customer>,
    pub created_at: NaiveDateTime,
    pub note: String,
}

impl ModelType for Order {
    const FULL_NAME: &'static str = "Order";
}

pub struct Customer {
    pub name: String,
}

impl ModelType for Customer {
    const FULL_NAME: &'static str = "Customer";

    fn build_up(builder: &mut TypeBuilder<Self>) -> Result<(), ModelError> {
        builder.has_caption("Customers");
        Ok(())
    }
}

struct Attached {
    type_name: String,
    member: Option<String>,
    directive: SharedDirective,
}

/// Registry double that records every attach and refresh call.
#[derive(Default)]
pub struct RecordingRegistry {
    types: BTreeMap<String, Vec<String>>,
    attached: RefCell<Vec<Attached>>,
    refreshed: RefCell<Vec<String>>,
}

impl RecordingRegistry {
    pub fn sample() -> Self {
        let mut types = BTreeMap::new();
        types.insert(
            "Order".to_string(),
            ["Total", "Status", "IsCancelled", "Customer", "CreatedAt", "Note"]
                .map(String::from)
                .to_vec(),
        );
        types.insert("Customer".to_string(), vec!["Name".to_string()]);
        Self {
            types,
            ..Self::default()
        }
    }

    pub fn type_directives(&self, type_name: &str) -> Vec<Directive> {
        self.collect(type_name, None)
            .iter()
            .map(SharedDirective::snapshot)
            .collect()
    }

    pub fn member_directives(&self, type_name: &str, member: &str) -> Vec<Directive> {
        self.member_handles(type_name, member)
            .iter()
            .map(SharedDirective::snapshot)
            .collect()
    }

    pub fn member_handles(&self, type_name: &str, member: &str) -> Vec<SharedDirective> {
        self.collect(type_name, Some(member))
    }

    pub fn refreshed(&self) -> Vec<String> {
        self.refreshed.borrow().clone()
    }

    fn collect(&self, type_name: &str, member: Option<&str>) -> Vec<SharedDirective> {
        self.attached
            .borrow()
            .iter()
            .filter(|a| a.type_name == type_name && a.member.as_deref() == member)
            .map(|a| a.directive.clone())
            .collect()
    }
}

impl DescriptorRegistry for RecordingRegistry {
    fn find_type(&self, identity: &TypeIdentity) -> Result<TypeDescriptor, RegistryError> {
        if self.types.contains_key(identity.full_name()) {
            Ok(TypeDescriptor::new(identity.full_name()))
        } else {
            Err(RegistryError::TypeNotFound(identity.full_name().to_string()))
        }
    }

    fn find_member(&self, owner: &TypeDescriptor, member: &str) -> Result<MemberDescriptor, RegistryError> {
        let known = self
            .types
            .get(owner.full_name())
            .is_some_and(|members| members.iter().any(|m| m == member));
        if known {
            Ok(MemberDescriptor::new(owner, member))
        } else {
            Err(RegistryError::MemberNotFound {
                type_name: owner.full_name().to_string(),
                member: member.to_string(),
            })
        }
    }

    fn attach_directive(&self, target: DirectiveTarget<'_>, directive: SharedDirective) {
        let member = match target {
            DirectiveTarget::Type(_) => None,
            DirectiveTarget::Member(member) => Some(member.name().to_string()),
        };
        self.attached.borrow_mut().push(Attached {
            type_name: target.type_name().to_string(),
            member,
            directive,
        });
    }

    fn refresh(&self, descriptor: &TypeDescriptor) {
        self.refreshed.borrow_mut().push(descriptor.full_name().to_string());
    }
}
