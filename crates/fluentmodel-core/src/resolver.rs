//! Member selectors and the resolver that turns them into member names.
//!
//! Rust has no expression trees, so selectors are quoted: the [`member!`]
//! macro type-checks the access expression against the owner type at compile
//! time and keeps its source text. The resolver then parses that text and
//! accepts only a direct member access (a single field identifier).
//!
//! [`member!`]: crate::member

use std::fmt;
use std::marker::PhantomData;

use fluentmodel_types::config::MemberNaming;
use fluentmodel_types::error::SelectorError;
use heck::ToUpperCamelCase;

/// Value-type marker for members selected by raw name, whose type is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Untyped {}

/// A quoted member access on owner type `T` yielding a `P`.
pub struct MemberSelector<T, P = Untyped> {
    text: String,
    _marker: PhantomData<fn(&T) -> P>,
}

impl<T, P> MemberSelector<T, P> {
    /// Selector for a field access; `accessor` pins the member's value type.
    pub fn field<F>(name: &str, _accessor: F) -> Self
    where
        F: Fn(&T) -> &P,
    {
        Self::from_text(name)
    }

    fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            _marker: PhantomData,
        }
    }

    /// Source text of the selected expression.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<T> MemberSelector<T, Untyped> {
    /// Selector from arbitrary expression text. Resolution fails unless the
    /// text is a single member identifier.
    pub fn quoted(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl<T, P> Clone for MemberSelector<T, P> {
    fn clone(&self) -> Self {
        Self::from_text(&self.text)
    }
}

impl<T, P> fmt::Debug for MemberSelector<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemberSelector").field(&self.text).finish()
    }
}

/// Build a [`MemberSelector`] for a member of `$owner`.
///
/// `member!(Order => total)` selects the `total` field and captures its value
/// type. Any other expression (`member!(Order => total.abs())`) still has to
/// type-check against `Order`, but produces a selector that fails to resolve.
#[macro_export]
macro_rules! member {
    ($owner:ty => $field:ident) => {
        $crate::resolver::MemberSelector::<$owner, _>::field(stringify!($field), |owner| {
            &owner.$field
        })
    };
    ($owner:ty => $($expr:tt)+) => {{
        let _ = |owner: &$owner| {
            let _ = &owner.$($expr)+;
        };
        $crate::resolver::MemberSelector::<$owner, $crate::resolver::Untyped>::quoted(
            stringify!($($expr)+),
        )
    }};
}

/// Translates selectors into registry member names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberResolver {
    naming: MemberNaming,
}

impl MemberResolver {
    pub fn new(naming: MemberNaming) -> Self {
        Self { naming }
    }

    /// Resolve a selector to the member name the registry declares.
    pub fn resolve<T, P>(&self, selector: &MemberSelector<T, P>) -> Result<String, SelectorError> {
        let ident = parse_member_access(selector.text())?;
        Ok(self.member_name(ident))
    }

    /// Apply the naming policy to a field identifier.
    pub fn member_name(&self, ident: &str) -> String {
        match self.naming {
            MemberNaming::PascalCase => ident.to_upper_camel_case(),
            MemberNaming::Verbatim => ident.to_string(),
        }
    }
}

/// Accept exactly one identifier (raw identifiers allowed).
fn parse_member_access(text: &str) -> Result<&str, SelectorError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SelectorError::Empty);
    }

    let ident = trimmed.strip_prefix("r#").unwrap_or(trimmed);
    let mut chars = ident.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic());
    let rest_ok = chars.all(|c| c == '_' || c.is_alphanumeric());

    if starts_well && rest_ok && ident != "_" {
        Ok(ident)
    } else {
        Err(SelectorError::NotAMemberAccess(trimmed.to_string()))
    }
}
