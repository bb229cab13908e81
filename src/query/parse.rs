//! Recursive-descent parser from the nested query form to [`OpNode`].

use crate::error::{RuleTreeError, RuleTreeResult};
use crate::query::ast::OpNode;
use crate::query::registry::{self, OpKind};
use serde_json::Value;

/// Parse a nested query value into an operation tree.
///
/// The value must be an object with a string `"type"` field of
/// `"variable"`, `"value"`, or `"operation"`; operations additionally carry
/// an `"operation"` code resolved through the registry, and every named
/// operand field is parsed recursively. Any structural mismatch fails with
/// [`RuleTreeError::Parse`] and aborts the whole parse.
#[tracing::instrument(level = "trace", skip_all)]
pub fn parse(value: &Value) -> RuleTreeResult<OpNode> {
    parse_node(value)
}

/// Parse query text (JSON) into an operation tree.
///
/// Decode failures surface as [`RuleTreeError::Json`]; structural failures
/// as [`RuleTreeError::Parse`].
pub fn parse_str(text: &str) -> RuleTreeResult<OpNode> {
    let value: Value = serde_json::from_str(text)?;
    parse(&value)
}

fn parse_node(value: &Value) -> RuleTreeResult<OpNode> {
    match query_type(value)? {
        "variable" => {
            let name = field(value, "value")?.as_str().ok_or_else(|| {
                RuleTreeError::parse("variable name must be a string")
            })?;
            Ok(OpNode::Variable {
                name: name.to_owned(),
            })
        }
        "value" => Ok(OpNode::Value {
            literal: field(value, "value")?.clone(),
        }),
        "operation" => parse_operation(value),
        other => Err(RuleTreeError::parse(format!(
            "unknown query type \"{other}\""
        ))),
    }
}

fn parse_operation(value: &Value) -> RuleTreeResult<OpNode> {
    let code = field(value, "operation")?
        .as_str()
        .ok_or_else(|| RuleTreeError::parse("operation code must be a string"))?;
    let kind = registry::lookup(code).ok_or_else(|| {
        RuleTreeError::parse(format!("unknown operation code \"{code}\""))
    })?;

    let node = match kind {
        OpKind::Compare(code) => OpNode::Compare {
            code,
            left: child(value, "left")?,
            right: child(value, "right")?,
        },
        OpKind::Math(code) => OpNode::Math {
            code,
            left: child(value, "left")?,
            right: child(value, "right")?,
        },
        OpKind::Abs => OpNode::Abs {
            value: child(value, "value")?,
        },
        OpKind::Logical(code) => OpNode::Logical {
            code,
            operands: operands(value)?,
        },
        OpKind::Count => OpNode::Count {
            value: child(value, "value")?,
            initial_value: child(value, "initial_value")?,
            unit: child(value, "unit")?,
        },
        OpKind::Aggregate(code) => OpNode::Aggregate {
            code,
            value: child(value, "value")?,
        },
        OpKind::Jump => OpNode::Jump {
            value: child(value, "value")?,
            from: child(value, "from")?,
            to: child(value, "to")?,
        },
        OpKind::Trend(code) => OpNode::Trend {
            code,
            value: child(value, "value")?,
            from: child(value, "from")?,
            to: child(value, "to")?,
            duration: child(value, "duration")?,
        },
        OpKind::Duration => OpNode::Duration {
            value: child(value, "value")?,
            min_duration: child(value, "minDuration")?,
        },
        OpKind::Select => OpNode::Select {
            value: child(value, "value")?,
        },
        OpKind::Judge => OpNode::Judge {
            value: child(value, "value")?,
        },
        OpKind::Declare => OpNode::Declare {
            left: child(value, "left")?,
            right: child(value, "right")?,
        },
    };
    Ok(node)
}

fn query_type(value: &Value) -> RuleTreeResult<&str> {
    value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            RuleTreeError::parse("query node must be an object with a string \"type\" field")
        })
}

fn field<'a>(value: &'a Value, name: &str) -> RuleTreeResult<&'a Value> {
    value
        .get(name)
        .ok_or_else(|| RuleTreeError::parse(format!("missing required field \"{name}\"")))
}

fn child(value: &Value, name: &str) -> RuleTreeResult<Box<OpNode>> {
    Ok(Box::new(parse_node(field(value, name)?)?))
}

fn operands(value: &Value) -> RuleTreeResult<Vec<OpNode>> {
    field(value, "operands")?
        .as_array()
        .ok_or_else(|| RuleTreeError::parse("\"operands\" must be an array"))?
        .iter()
        .map(parse_node)
        .collect()
}
