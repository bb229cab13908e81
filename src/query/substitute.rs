//! Variable substitution: resolving named variables against caller-supplied
//! bindings.

use crate::error::{RuleTreeError, RuleTreeResult};
use crate::query::ast::OpNode;
use std::collections::HashMap;

impl OpNode {
    /// Substitute named variables in this subtree with bound sub-trees,
    /// consuming the node and returning the rewritten tree.
    ///
    /// Compare, math, abs, logical, count, aggregate, judge, trend, and
    /// declare nodes rewrite their affected slots (compare/math both sides,
    /// logical every operand in order, declare its `right`, the rest their
    /// `value`). A bare variable resolves itself against `bindings`, failing
    /// with [`RuleTreeError::UnknownVariable`] when absent. Anything else —
    /// including duration, select, and jump — fails with
    /// [`RuleTreeError::Unsupported`].
    ///
    /// Bound sub-trees are cloned out of the mapping, so one binding may
    /// fill several slots.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn replace_variable(
        self,
        bindings: &HashMap<String, OpNode>,
    ) -> RuleTreeResult<OpNode> {
        match self {
            OpNode::Variable { name } => match bindings.get(&name) {
                Some(bound) => Ok(bound.clone()),
                None => Err(RuleTreeError::UnknownVariable(name)),
            },
            OpNode::Compare { code, left, right } => Ok(OpNode::Compare {
                code,
                left: Box::new(substitute_slot(*left, bindings)?),
                right: Box::new(substitute_slot(*right, bindings)?),
            }),
            OpNode::Math { code, left, right } => Ok(OpNode::Math {
                code,
                left: Box::new(substitute_slot(*left, bindings)?),
                right: Box::new(substitute_slot(*right, bindings)?),
            }),
            OpNode::Abs { value } => Ok(OpNode::Abs {
                value: Box::new(substitute_slot(*value, bindings)?),
            }),
            OpNode::Logical { code, operands } => Ok(OpNode::Logical {
                code,
                operands: operands
                    .into_iter()
                    .map(|operand| substitute_slot(operand, bindings))
                    .collect::<RuleTreeResult<Vec<_>>>()?,
            }),
            OpNode::Count {
                value,
                initial_value,
                unit,
            } => Ok(OpNode::Count {
                value: Box::new(substitute_slot(*value, bindings)?),
                initial_value,
                unit,
            }),
            OpNode::Aggregate { code, value } => Ok(OpNode::Aggregate {
                code,
                value: Box::new(substitute_slot(*value, bindings)?),
            }),
            OpNode::Judge { value } => Ok(OpNode::Judge {
                value: Box::new(substitute_slot(*value, bindings)?),
            }),
            OpNode::Trend {
                code,
                value,
                from,
                to,
                duration,
            } => Ok(OpNode::Trend {
                code,
                value: Box::new(substitute_slot(*value, bindings)?),
                from,
                to,
                duration,
            }),
            OpNode::Declare { left, right } => Ok(OpNode::Declare {
                left,
                right: Box::new(substitute_slot(*right, bindings)?),
            }),
            other => Err(RuleTreeError::unsupported(
                other.kind_name(),
                "replace_variable",
            )),
        }
    }
}

/// Per-slot policy: variables resolve, allow-variable kinds recurse, anything
/// else passes through unchanged.
fn substitute_slot(
    slot: OpNode,
    bindings: &HashMap<String, OpNode>,
) -> RuleTreeResult<OpNode> {
    if matches!(slot, OpNode::Variable { .. }) || slot.accepts_variable() {
        return slot.replace_variable(bindings);
    }
    Ok(slot)
}
