//! The operation-node tree.

use crate::error::{RuleTreeError, RuleTreeResult};
use crate::query::registry::{AggregateCode, CompareCode, LogicalCode, MathCode, TrendCode};
use serde::{Deserialize, Serialize};

/// Name reserved for variables that must be filled by external input before
/// the tree is meaningful to an evaluator.
pub const DEFAULT_VARIABLE: &str = "default";

/// One node of a rule expression tree.
///
/// Each internal node exclusively owns its children; the tree is strict (no
/// sharing, no cycles) and structural content is its only identity. Trees
/// are produced by [`crate::parse`] and rewritten only through
/// [`OpNode::set_input`] and [`OpNode::replace_variable`], both of which
/// consume the node and return its replacement.
#[derive(Debug, Clone, PartialEq)]
pub enum OpNode {
    /// Named reference, resolved later by substitution or by the evaluator.
    Variable {
        /// Referenced name; [`DEFAULT_VARIABLE`] is reserved.
        name: String,
    },
    /// Opaque literal passed through to the evaluator unchanged.
    Value {
        /// Literal payload.
        literal: serde_json::Value,
    },
    /// Binary comparison.
    Compare {
        /// Comparison code.
        code: CompareCode,
        /// Left operand.
        left: Box<OpNode>,
        /// Right operand.
        right: Box<OpNode>,
    },
    /// Binary arithmetic.
    Math {
        /// Arithmetic code.
        code: MathCode,
        /// Left operand.
        left: Box<OpNode>,
        /// Right operand.
        right: Box<OpNode>,
    },
    /// Absolute value.
    Abs {
        /// Operand.
        value: Box<OpNode>,
    },
    /// Logical combinator over an ordered operand sequence.
    Logical {
        /// Combinator code.
        code: LogicalCode,
        /// Operands, in order. Any arity parses; a meaningful tree has at
        /// least one operand.
        operands: Vec<OpNode>,
    },
    /// Event counter.
    Count {
        /// Counted condition.
        value: Box<OpNode>,
        /// Counter start value.
        initial_value: Box<OpNode>,
        /// Counting unit.
        unit: Box<OpNode>,
    },
    /// Aggregate over a signal.
    Aggregate {
        /// Aggregate code.
        code: AggregateCode,
        /// Aggregated operand.
        value: Box<OpNode>,
    },
    /// Level jump between two states.
    Jump {
        /// Observed signal.
        value: Box<OpNode>,
        /// Source level.
        from: Box<OpNode>,
        /// Target level.
        to: Box<OpNode>,
    },
    /// Timed transition check.
    Trend {
        /// Trend code.
        code: TrendCode,
        /// Observed signal.
        value: Box<OpNode>,
        /// Source level.
        from: Box<OpNode>,
        /// Target level.
        to: Box<OpNode>,
        /// Window length.
        duration: Box<OpNode>,
    },
    /// Minimum-duration condition check.
    Duration {
        /// Checked condition.
        value: Box<OpNode>,
        /// Minimum duration; serialized as `"minDuration"`.
        min_duration: Box<OpNode>,
    },
    /// Signal selection.
    Select {
        /// Selected signal reference.
        value: Box<OpNode>,
    },
    /// Stand-alone predicate over its operand.
    Judge {
        /// Judged condition.
        value: Box<OpNode>,
    },
    /// Named derived-variable declaration. `left` must resolve to a
    /// [`OpNode::Variable`]; the rule is checked lazily, when
    /// [`OpNode::variable_name`] is first requested.
    Declare {
        /// Declared name.
        left: Box<OpNode>,
        /// Assigned expression.
        right: Box<OpNode>,
    },
}

impl OpNode {
    /// Build a variable leaf.
    pub fn variable(name: impl Into<String>) -> Self {
        OpNode::Variable { name: name.into() }
    }

    /// Build a literal leaf.
    pub fn value(literal: impl Into<serde_json::Value>) -> Self {
        OpNode::Value {
            literal: literal.into(),
        }
    }

    /// Kind of this node, as used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            OpNode::Variable { .. } => "variable",
            OpNode::Value { .. } => "value",
            OpNode::Compare { .. } => "compare",
            OpNode::Math { .. } => "math",
            OpNode::Abs { .. } => "abs",
            OpNode::Logical { .. } => "logical",
            OpNode::Count { .. } => "count",
            OpNode::Aggregate { .. } => "aggregate",
            OpNode::Jump { .. } => "jump",
            OpNode::Trend { .. } => "trend",
            OpNode::Duration { .. } => "duration",
            OpNode::Select { .. } => "select",
            OpNode::Judge { .. } => "judge",
            OpNode::Declare { .. } => "declare",
        }
    }

    /// Return `true` for a variable leaf named [`DEFAULT_VARIABLE`], i.e. a
    /// slot that requires external input.
    pub fn is_default(&self) -> bool {
        matches!(self, OpNode::Variable { name } if name == DEFAULT_VARIABLE)
    }

    /// Return `true` when the node implements [`OpNode::set_input`].
    pub fn accepts_input(&self) -> bool {
        matches!(
            self,
            OpNode::Logical { .. }
                | OpNode::Judge { .. }
                | OpNode::Count { .. }
                | OpNode::Declare { .. }
                | OpNode::Duration { .. }
        )
    }

    /// Return `true` when the node implements [`OpNode::replace_variable`]
    /// over its slots. A bare [`OpNode::Variable`] is not in this set; it
    /// resolves itself directly against the bindings instead.
    pub fn accepts_variable(&self) -> bool {
        matches!(
            self,
            OpNode::Compare { .. }
                | OpNode::Math { .. }
                | OpNode::Abs { .. }
                | OpNode::Logical { .. }
                | OpNode::Count { .. }
                | OpNode::Aggregate { .. }
                | OpNode::Judge { .. }
                | OpNode::Trend { .. }
                | OpNode::Declare { .. }
        )
    }

    /// Return `true` for trees meaningful as stand-alone statements: a named
    /// declaration ([`OpNode::Declare`]) or a predicate ([`OpNode::Judge`]).
    pub fn is_final_result(&self) -> bool {
        matches!(self, OpNode::Declare { .. } | OpNode::Judge { .. })
    }

    /// Declared name of a [`OpNode::Declare`] tree.
    ///
    /// Fails with [`RuleTreeError::StructuralInvariant`] when the left side
    /// is not a variable, and with [`RuleTreeError::Unsupported`] on any
    /// other node kind.
    pub fn variable_name(&self) -> RuleTreeResult<&str> {
        match self {
            OpNode::Declare { left, .. } => match left.as_ref() {
                OpNode::Variable { name } => Ok(name),
                other => Err(RuleTreeError::structural(format!(
                    "left side of a declare operation must be a variable, found {}",
                    other.kind_name()
                ))),
            },
            other => Err(RuleTreeError::unsupported(other.kind_name(), "variable_name")),
        }
    }

    /// Serialized form of the expression a [`OpNode::Declare`] tree assigns
    /// to its declared name.
    pub fn variable_value(&self) -> RuleTreeResult<serde_json::Value> {
        match self {
            OpNode::Declare { right, .. } => Ok(right.build_query()),
            other => Err(RuleTreeError::unsupported(other.kind_name(), "variable_value")),
        }
    }
}

impl Serialize for OpNode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.build_query().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OpNode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        crate::query::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compare_sample() -> OpNode {
        OpNode::Compare {
            code: CompareCode::Gt,
            left: Box::new(OpNode::variable("x")),
            right: Box::new(OpNode::value(10)),
        }
    }

    #[test]
    fn default_status_is_derived_from_the_name() {
        assert!(OpNode::variable("default").is_default());
        assert!(!OpNode::variable("Default").is_default());
        assert!(!OpNode::variable("x").is_default());
        assert!(!OpNode::value("default").is_default());
    }

    #[test]
    fn capability_sets_match_their_definitions() {
        let judge = OpNode::Judge {
            value: Box::new(compare_sample()),
        };
        let select = OpNode::Select {
            value: Box::new(OpNode::variable("a")),
        };
        let duration = OpNode::Duration {
            value: Box::new(compare_sample()),
            min_duration: Box::new(OpNode::value(0.1)),
        };

        assert!(judge.accepts_input());
        assert!(judge.accepts_variable());
        assert!(duration.accepts_input());
        assert!(!duration.accepts_variable());
        assert!(!select.accepts_input());
        assert!(!select.accepts_variable());
        assert!(!compare_sample().accepts_input());
        assert!(compare_sample().accepts_variable());
    }

    #[test]
    fn finality_is_exactly_declare_and_judge() {
        let declare = OpNode::Declare {
            left: Box::new(OpNode::variable("load_spikes")),
            right: Box::new(compare_sample()),
        };
        let judge = OpNode::Judge {
            value: Box::new(compare_sample()),
        };
        assert!(declare.is_final_result());
        assert!(judge.is_final_result());
        assert!(!compare_sample().is_final_result());
        assert!(!OpNode::variable("x").is_final_result());
    }

    #[test]
    fn declare_accessors_resolve_left_and_right() {
        let declare = OpNode::Declare {
            left: Box::new(OpNode::variable("load_spikes")),
            right: Box::new(OpNode::value(2)),
        };
        assert_eq!(declare.variable_name().unwrap(), "load_spikes");
        assert_eq!(
            declare.variable_value().unwrap(),
            json!({"type": "value", "value": 2})
        );
    }

    #[test]
    fn declare_left_must_be_a_variable() {
        let declare = OpNode::Declare {
            left: Box::new(OpNode::value(1)),
            right: Box::new(OpNode::value(2)),
        };
        assert!(matches!(
            declare.variable_name(),
            Err(RuleTreeError::StructuralInvariant(_))
        ));
        // The right side stays reachable regardless.
        assert!(declare.variable_value().is_ok());
    }

    #[test]
    fn declare_accessors_reject_other_kinds() {
        assert!(matches!(
            compare_sample().variable_name(),
            Err(RuleTreeError::Unsupported { .. })
        ));
        assert!(matches!(
            OpNode::variable("x").variable_value(),
            Err(RuleTreeError::Unsupported { .. })
        ));
    }

    #[test]
    fn serde_bridge_round_trips_the_wire_form() {
        let node = compare_sample();
        let encoded = serde_json::to_value(&node).unwrap();
        assert_eq!(encoded, node.build_query());
        let decoded: OpNode = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, node);
    }
}
