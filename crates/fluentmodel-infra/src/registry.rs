//! In-memory descriptor registry.
//!
//! Holds declared types and members, the directive handles attached to them,
//! and a per-type [`TypeView`]: a snapshot of every attached directive that is
//! only recomputed when the type is refreshed. Until then the view reflects
//! the previous refresh (or does not exist yet), the same way a metadata
//! store caches its computed model between reloads.

use std::cell::RefCell;
use std::collections::BTreeMap;

use fluentmodel_core::registry::DescriptorRegistry;
use fluentmodel_types::descriptor::{DirectiveTarget, MemberDescriptor, TypeDescriptor, TypeIdentity};
use fluentmodel_types::directive::{Directive, SharedDirective};
use fluentmodel_types::error::RegistryError;
use serde::Serialize;

/// Computed snapshot of one type and its members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeView {
    pub full_name: String,
    pub directives: Vec<Directive>,
    pub members: Vec<MemberView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberView {
    pub name: String,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Default)]
struct TypeEntry {
    /// Declared member names, in declaration order.
    members: Vec<String>,
    directives: Vec<SharedDirective>,
    member_directives: BTreeMap<String, Vec<SharedDirective>>,
    view: Option<TypeView>,
    refresh_count: usize,
}

fn snapshot(handles: &[SharedDirective]) -> Vec<Directive> {
    handles.iter().map(SharedDirective::snapshot).collect()
}

impl TypeEntry {
    fn compute_view(&self, full_name: &str) -> TypeView {
        TypeView {
            full_name: full_name.to_string(),
            directives: snapshot(&self.directives),
            members: self
                .members
                .iter()
                .map(|name| MemberView {
                    name: name.clone(),
                    directives: self
                        .member_directives
                        .get(name)
                        .map(|handles| snapshot(handles))
                        .unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Registry backed by in-process maps. Single-threaded; share it through
/// `Rc`.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    types: RefCell<BTreeMap<String, TypeEntry>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`declare_type`](Self::declare_type).
    pub fn with_type<I, S>(self, full_name: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare_type(full_name, members);
        self
    }

    /// Declare a type and its members. Returns `false` (and changes nothing)
    /// if the type is already declared.
    pub fn declare_type<I, S>(&self, full_name: &str, members: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut types = self.types.borrow_mut();
        if types.contains_key(full_name) {
            return false;
        }
        let entry = TypeEntry {
            members: members.into_iter().map(Into::into).collect(),
            ..TypeEntry::default()
        };
        tracing::debug!(type_name = full_name, members = entry.members.len(), "declared type");
        types.insert(full_name.to_string(), entry);
        true
    }

    /// Declared type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        self.types.borrow().keys().cloned().collect()
    }

    /// The cached view of a type as of its last refresh.
    pub fn view(&self, full_name: &str) -> Option<TypeView> {
        self.types.borrow().get(full_name).and_then(|entry| entry.view.clone())
    }

    /// Cached views of every refreshed type, sorted by name.
    pub fn views(&self) -> Vec<TypeView> {
        self.types
            .borrow()
            .values()
            .filter_map(|entry| entry.view.clone())
            .collect()
    }

    pub fn refresh_count(&self, full_name: &str) -> usize {
        self.types
            .borrow()
            .get(full_name)
            .map_or(0, |entry| entry.refresh_count)
    }

    /// Live state of the directives attached to `target`, bypassing the
    /// cached view.
    pub fn directives_on(&self, target: DirectiveTarget<'_>) -> Vec<Directive> {
        let types = self.types.borrow();
        let Some(entry) = types.get(target.type_name()) else {
            return Vec::new();
        };
        let handles = match target {
            DirectiveTarget::Type(_) => Some(&entry.directives),
            DirectiveTarget::Member(member) => entry.member_directives.get(member.name()),
        };
        handles.map(|handles| snapshot(handles)).unwrap_or_default()
    }
}

impl DescriptorRegistry for InMemoryRegistry {
    fn find_type(&self, identity: &TypeIdentity) -> Result<TypeDescriptor, RegistryError> {
        if self.types.borrow().contains_key(identity.full_name()) {
            Ok(TypeDescriptor::new(identity.full_name()))
        } else {
            Err(RegistryError::TypeNotFound(identity.full_name().to_string()))
        }
    }

    fn find_member(&self, owner: &TypeDescriptor, member: &str) -> Result<MemberDescriptor, RegistryError> {
        let types = self.types.borrow();
        let entry = types
            .get(owner.full_name())
            .ok_or_else(|| RegistryError::TypeNotFound(owner.full_name().to_string()))?;

        if entry.members.iter().any(|declared| declared == member) {
            Ok(MemberDescriptor::new(owner, member))
        } else {
            Err(RegistryError::MemberNotFound {
                type_name: owner.full_name().to_string(),
                member: member.to_string(),
            })
        }
    }

    fn attach_directive(&self, target: DirectiveTarget<'_>, directive: SharedDirective) {
        let mut types = self.types.borrow_mut();
        let Some(entry) = types.get_mut(target.type_name()) else {
            tracing::warn!(directive_target = %target, "dropping directive for undeclared type");
            return;
        };
        match target {
            DirectiveTarget::Type(_) => entry.directives.push(directive),
            DirectiveTarget::Member(member) => entry
                .member_directives
                .entry(member.name().to_string())
                .or_default()
                .push(directive),
        }
    }

    fn refresh(&self, descriptor: &TypeDescriptor) {
        let mut types = self.types.borrow_mut();
        let Some(entry) = types.get_mut(descriptor.full_name()) else {
            tracing::warn!(type_name = %descriptor, "refresh requested for undeclared type");
            return;
        };
        entry.view = Some(entry.compute_view(descriptor.full_name()));
        entry.refresh_count += 1;
        tracing::debug!(type_name = %descriptor, count = entry.refresh_count, "refreshed type view");
    }
}
