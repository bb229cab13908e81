//! Serialization from [`OpNode`] back to the nested query form.

use crate::query::ast::OpNode;
use serde_json::{Value, json};

impl OpNode {
    /// Serialize the tree into the nested query form accepted by
    /// [`crate::parse`], field for field.
    ///
    /// Total for any structurally valid tree. [`OpNode::Declare`] is the one
    /// asymmetry: it serializes to the query of its `right` operand only — a
    /// declaration stands for the value it assigns, not for its own shape.
    pub fn build_query(&self) -> Value {
        match self {
            OpNode::Variable { name } => json!({
                "type": "variable",
                "value": name,
            }),
            OpNode::Value { literal } => json!({
                "type": "value",
                "value": literal,
            }),
            OpNode::Compare { code, left, right } => json!({
                "type": "operation",
                "operation": code.as_str(),
                "left": left.build_query(),
                "right": right.build_query(),
            }),
            OpNode::Math { code, left, right } => json!({
                "type": "operation",
                "operation": code.as_str(),
                "left": left.build_query(),
                "right": right.build_query(),
            }),
            OpNode::Abs { value } => json!({
                "type": "operation",
                "operation": "ABS",
                "value": value.build_query(),
            }),
            OpNode::Logical { code, operands } => json!({
                "type": "operation",
                "operation": code.as_str(),
                "operands": operands.iter().map(OpNode::build_query).collect::<Vec<_>>(),
            }),
            OpNode::Count {
                value,
                initial_value,
                unit,
            } => json!({
                "type": "operation",
                "operation": "COUNT",
                "value": value.build_query(),
                "initial_value": initial_value.build_query(),
                "unit": unit.build_query(),
            }),
            OpNode::Aggregate { code, value } => json!({
                "type": "operation",
                "operation": code.as_str(),
                "value": value.build_query(),
            }),
            OpNode::Jump { value, from, to } => json!({
                "type": "operation",
                "operation": "JUMP",
                "value": value.build_query(),
                "from": from.build_query(),
                "to": to.build_query(),
            }),
            OpNode::Trend {
                code,
                value,
                from,
                to,
                duration,
            } => json!({
                "type": "operation",
                "operation": code.as_str(),
                "value": value.build_query(),
                "from": from.build_query(),
                "to": to.build_query(),
                "duration": duration.build_query(),
            }),
            OpNode::Duration {
                value,
                min_duration,
            } => json!({
                "type": "operation",
                "operation": "DURATION",
                "value": value.build_query(),
                "minDuration": min_duration.build_query(),
            }),
            OpNode::Select { value } => json!({
                "type": "operation",
                "operation": "SELECT",
                "value": value.build_query(),
            }),
            OpNode::Judge { value } => json!({
                "type": "operation",
                "operation": "JUDGE",
                "value": value.build_query(),
            }),
            OpNode::Declare { right, .. } => right.build_query(),
        }
    }
}
