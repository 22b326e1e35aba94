//! Descriptor registry trait definition (port).
//!
//! The registry owns type and member descriptors and the directives attached
//! to them. The infrastructure layer (fluentmodel-infra) provides an
//! in-memory implementation; hosts embedding the engine implement it over
//! their own metadata store.

use fluentmodel_types::descriptor::{DirectiveTarget, MemberDescriptor, TypeDescriptor, TypeIdentity};
use fluentmodel_types::directive::SharedDirective;
use fluentmodel_types::error::RegistryError;

/// Registry of type and member descriptors.
///
/// Methods take `&self`; implementations keep their mutable state behind
/// interior mutability because builders share one registry handle.
pub trait DescriptorRegistry {
    /// Resolve a type identity to its descriptor.
    fn find_type(&self, identity: &TypeIdentity) -> Result<TypeDescriptor, RegistryError>;

    /// Resolve a member of `owner` by its declared name.
    fn find_member(
        &self,
        owner: &TypeDescriptor,
        member: &str,
    ) -> Result<MemberDescriptor, RegistryError>;

    /// Attach a directive to a type or member descriptor.
    fn attach_directive(&self, target: DirectiveTarget<'_>, directive: SharedDirective);

    /// Recompute the registry's cached view of a type after its directives
    /// (or its members' directives) changed.
    fn refresh(&self, descriptor: &TypeDescriptor);
}
