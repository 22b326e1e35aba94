use serde::{Deserialize, Serialize};

use std::fmt;

/// Key used to look a declared type up in a descriptor registry.
///
/// Wraps the type's fully qualified name. Rust types obtain theirs through
/// `fluentmodel_core::ModelType::FULL_NAME`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeIdentity(String);

impl TypeIdentity {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self(full_name.into())
    }

    pub fn full_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry handle for one declared type.
///
/// The registry owns the descriptor state; builders only keep this handle,
/// which is cheap to clone and compares by full name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeDescriptor {
    full_name: String,
}

impl TypeDescriptor {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
        }
    }

    /// Fully qualified name, used as the prefix of generated directive ids.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name)
    }
}

/// Registry handle for one member of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberDescriptor {
    owner: String,
    name: String,
}

impl MemberDescriptor {
    pub fn new(owner: &TypeDescriptor, name: impl Into<String>) -> Self {
        Self {
            owner: owner.full_name().to_string(),
            name: name.into(),
        }
    }

    /// Declared member name as the registry knows it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full name of the declaring type.
    pub fn owner_name(&self) -> &str {
        &self.owner
    }

    /// `"{owner}.{name}"`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

/// The descriptor a directive is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveTarget<'a> {
    Type(&'a TypeDescriptor),
    Member(&'a MemberDescriptor),
}

impl DirectiveTarget<'_> {
    /// Full name of the type that owns the target.
    pub fn type_name(&self) -> &str {
        match self {
            DirectiveTarget::Type(ty) => ty.full_name(),
            DirectiveTarget::Member(member) => member.owner_name(),
        }
    }
}

impl<'a> From<&'a TypeDescriptor> for DirectiveTarget<'a> {
    fn from(descriptor: &'a TypeDescriptor) -> Self {
        DirectiveTarget::Type(descriptor)
    }
}

impl<'a> From<&'a MemberDescriptor> for DirectiveTarget<'a> {
    fn from(descriptor: &'a MemberDescriptor) -> Self {
        DirectiveTarget::Member(descriptor)
    }
}

impl fmt::Display for DirectiveTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveTarget::Type(ty) => write!(f, "{ty}"),
            DirectiveTarget::Member(member) => write!(f, "{member}"),
        }
    }
}
