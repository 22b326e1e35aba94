//! Builder-local token lists materialized at finalize.

/// Separator placed between accumulated tokens.
pub const TOKEN_DELIMITER: &str = ";";

/// Append-only list of tokens for one multi-valued directive field.
///
/// Tokens are kept verbatim: no trimming, no deduplication. Materializing
/// never clears the list, so a second finalize yields the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    tokens: Vec<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The joined value, or `None` when nothing was accumulated.
    pub fn materialize(&self) -> Option<String> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(self.tokens.join(TOKEN_DELIMITER))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_materializes_to_none() {
        assert_eq!(Accumulator::new().materialize(), None);
    }

    #[test]
    fn test_single_token_has_no_delimiter() {
        let mut acc = Accumulator::new();
        acc.push("Status");
        assert_eq!(acc.materialize().as_deref(), Some("Status"));
    }

    #[test]
    fn test_tokens_join_in_order_with_duplicates() {
        let mut acc = Accumulator::new();
        for token in ["LayoutItem", "Action", "LayoutItem"] {
            acc.push(token);
        }
        assert_eq!(acc.materialize().as_deref(), Some("LayoutItem;Action;LayoutItem"));
        assert_eq!(acc.tokens().len(), 3);
    }

    #[test]
    fn test_materialize_does_not_drain() {
        let mut acc = Accumulator::new();
        acc.push("*");
        acc.push("X");
        let first = acc.materialize();
        assert_eq!(first, acc.materialize());
        assert!(!acc.is_empty());
    }
}
