//! Input injection: filling `"default"` placeholders with caller-supplied
//! sub-expressions.

use crate::error::{RuleTreeError, RuleTreeResult};
use crate::query::ast::OpNode;

impl OpNode {
    /// Inject caller-supplied operations into this node's designated input
    /// slot, consuming the node and returning the rewritten tree.
    ///
    /// Only logical, judge, count, declare, and duration nodes accept
    /// injection; anything else fails with [`RuleTreeError::Unsupported`].
    /// A logical node rebinds its whole operand sequence to `operations`,
    /// whatever their number. The single-slot kinds (count/judge/duration
    /// inject into `value`, declare into `right`) require exactly one
    /// operation and apply it where the slot holds a default-sentinel
    /// variable, delegate one hop when the slot itself accepts input, and
    /// otherwise leave the slot unchanged.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn set_input(self, operations: Vec<OpNode>) -> RuleTreeResult<OpNode> {
        match self {
            OpNode::Logical { code, .. } => Ok(OpNode::Logical {
                code,
                operands: operations,
            }),
            OpNode::Count {
                value,
                initial_value,
                unit,
            } => Ok(OpNode::Count {
                value: Box::new(inject_slot(*value, operations)?),
                initial_value,
                unit,
            }),
            OpNode::Judge { value } => Ok(OpNode::Judge {
                value: Box::new(inject_slot(*value, operations)?),
            }),
            OpNode::Duration {
                value,
                min_duration,
            } => Ok(OpNode::Duration {
                value: Box::new(inject_slot(*value, operations)?),
                min_duration,
            }),
            OpNode::Declare { left, right } => Ok(OpNode::Declare {
                left,
                right: Box::new(inject_slot(*right, operations)?),
            }),
            other => Err(RuleTreeError::unsupported(other.kind_name(), "set_input")),
        }
    }
}

/// Single-slot policy: the arity check comes first, even when the slot ends
/// up untouched.
fn inject_slot(slot: OpNode, mut operations: Vec<OpNode>) -> RuleTreeResult<OpNode> {
    if operations.len() != 1 {
        return Err(RuleTreeError::InputArity(operations.len()));
    }
    if slot.is_default() {
        return Ok(operations.pop().unwrap());
    }
    if slot.accepts_input() {
        return slot.set_input(operations);
    }
    Ok(slot)
}
