use thiserror::Error;

/// Errors raised by a descriptor registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("type '{0}' not found in registry")]
    TypeNotFound(String),

    #[error("member '{member}' not found on type '{type_name}'")]
    MemberNotFound { type_name: String, member: String },
}

/// Errors raised while resolving a member selector to a member name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("selector '{0}' is not a direct member access")]
    NotAMemberAccess(String),

    #[error("selector is empty")]
    Empty,
}

/// Errors surfaced while building or assembling a model.
///
/// Any of these aborts the assembly run; nothing is finalized or refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error("model definition error: {0}")]
    Definition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::MemberNotFound {
            type_name: "Order".to_string(),
            member: "Totl".to_string(),
        };
        assert_eq!(err.to_string(), "member 'Totl' not found on type 'Order'");
    }

    #[test]
    fn test_model_error_is_transparent() {
        let err = ModelError::from(SelectorError::NotAMemberAccess("total.len()".to_string()));
        assert_eq!(err.to_string(), "selector 'total.len()' is not a direct member access");

        let err = ModelError::from(RegistryError::TypeNotFound("Invoice".to_string()));
        assert_eq!(err.to_string(), "type 'Invoice' not found in registry");
    }
}
