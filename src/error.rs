//! Error taxonomy shared across parsing and rewriting.

/// Convenience alias for fallible operations in this crate.
pub type RuleTreeResult<T> = Result<T, RuleTreeError>;

/// Errors raised while parsing or rewriting an operation tree.
///
/// Every error is raised synchronously at the point of violation. The
/// rewriting methods consume the tree they are called on, so a caller that
/// must keep a usable tree across a failed rewrite should operate on a
/// clone.
#[derive(thiserror::Error, Debug)]
pub enum RuleTreeError {
    /// The nested query value does not have a shape the parser accepts.
    #[error("parse error: {0}")]
    Parse(String),

    /// A rewrite or accessor was invoked on a node kind outside its
    /// capability set.
    #[error("{kind} node does not support {operation}")]
    Unsupported {
        /// Kind of the offending node.
        kind: &'static str,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// Single-slot injection requires exactly one replacement operation.
    #[error("expected exactly one input operation, got {0}")]
    InputArity(usize),

    /// Substitution hit a variable with no entry in the supplied bindings.
    #[error("unknown variable \"{0}\"")]
    UnknownVariable(String),

    /// A lazily checked structural rule was violated.
    #[error("structural invariant violated: {0}")]
    StructuralInvariant(String),

    /// The query text is not valid JSON.
    #[error("invalid query JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RuleTreeError {
    /// Build a [`RuleTreeError::Parse`] from any message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`RuleTreeError::StructuralInvariant`] from any message.
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::StructuralInvariant(msg.into())
    }

    /// Build a [`RuleTreeError::Unsupported`] for `operation` on `kind`.
    pub fn unsupported(kind: &'static str, operation: &'static str) -> Self {
        Self::Unsupported { kind, operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            RuleTreeError::parse("x").to_string().contains("parse error:")
        );
        assert!(
            RuleTreeError::structural("x")
                .to_string()
                .contains("structural invariant violated:")
        );
        assert_eq!(
            RuleTreeError::unsupported("select", "set_input").to_string(),
            "select node does not support set_input"
        );
        assert_eq!(
            RuleTreeError::InputArity(2).to_string(),
            "expected exactly one input operation, got 2"
        );
        assert_eq!(
            RuleTreeError::UnknownVariable("y".to_owned()).to_string(),
            "unknown variable \"y\""
        );
    }

    #[test]
    fn json_preserves_source() {
        let base = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RuleTreeError::from(base);
        assert!(err.to_string().starts_with("invalid query JSON:"));
    }
}
