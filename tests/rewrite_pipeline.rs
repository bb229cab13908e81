//! End-to-end: parse a rule with a default slot, inject the monitored
//! condition, bind its variables, and hand the serialized query to a
//! (hypothetical) evaluator.

use ruletree::{OpNode, parse, parse_str};
use serde_json::json;
use std::collections::HashMap;

#[test]
fn inject_bind_and_serialize_a_judge_rule() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();

    let rule = parse_str(include_str!("data/judge_default_rule.json")).unwrap();

    // The caller supplies the condition the rule should judge: both
    // selected signals stay within their thresholds.
    let condition = parse(&json!({
        "type": "operation",
        "operation": "AND",
        "operands": [
            {
                "type": "operation",
                "operation": "GT",
                "left": {"type": "variable", "value": "lo_threshold"},
                "right": {
                    "type": "operation",
                    "operation": "MIN",
                    "value": {"type": "variable", "value": "pressure"},
                },
            },
            {
                "type": "operation",
                "operation": "LT",
                "left": {
                    "type": "operation",
                    "operation": "MAX",
                    "value": {"type": "variable", "value": "pressure"},
                },
                "right": {"type": "variable", "value": "hi_threshold"},
            },
        ],
    }))
    .unwrap();

    let rule = rule.set_input(vec![condition]).unwrap();

    let bindings = HashMap::from([
        ("lo_threshold".to_owned(), OpNode::value(2)),
        ("hi_threshold".to_owned(), OpNode::value(8)),
        (
            "pressure".to_owned(),
            OpNode::Select {
                value: Box::new(OpNode::variable("pressure")),
            },
        ),
    ]);
    let rule = rule.replace_variable(&bindings).unwrap();

    let select_pressure = json!({
        "type": "operation",
        "operation": "SELECT",
        "value": {"type": "variable", "value": "pressure"},
    });
    assert_eq!(
        rule.build_query(),
        json!({
            "type": "operation",
            "operation": "JUDGE",
            "value": {
                "type": "operation",
                "operation": "AND",
                "operands": [
                    {
                        "type": "operation",
                        "operation": "GT",
                        "left": {"type": "value", "value": 2},
                        "right": {
                            "type": "operation",
                            "operation": "MIN",
                            "value": select_pressure.clone(),
                        },
                    },
                    {
                        "type": "operation",
                        "operation": "LT",
                        "left": {
                            "type": "operation",
                            "operation": "MAX",
                            "value": select_pressure,
                        },
                        "right": {"type": "value", "value": 8},
                    },
                ],
            },
        })
    );
}

#[test]
fn failed_rewrites_leave_a_clone_usable() {
    let rule = parse_str(include_str!("data/judge_default_rule.json")).unwrap();

    // A failed injection consumes the tree it was called on; callers that
    // must not lose state rewrite a clone.
    let err = rule.clone().set_input(vec![]).unwrap_err();
    assert!(matches!(err, ruletree::RuleTreeError::InputArity(0)));

    let rule = rule.set_input(vec![OpNode::value(true)]).unwrap();
    assert_eq!(
        rule.build_query(),
        json!({
            "type": "operation",
            "operation": "JUDGE",
            "value": {"type": "value", "value": true},
        })
    );
}
