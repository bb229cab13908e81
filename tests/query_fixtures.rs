use ruletree::{OpNode, parse_str};
use serde_json::Value;

#[test]
fn count_duration_fixture_round_trips() {
    let text = include_str!("data/count_duration_rule.json");
    let rule = parse_str(text).unwrap();
    assert!(!rule.is_final_result());

    let expected: Value = serde_json::from_str(text).unwrap();
    assert_eq!(rule.build_query(), expected);
}

#[test]
fn declare_fixture_round_trips_to_its_right_operand() {
    let text = include_str!("data/declare_hold_rule.json");
    let rule = parse_str(text).unwrap();

    assert!(rule.is_final_result());
    assert_eq!(rule.variable_name().unwrap(), "overheat");

    let input: Value = serde_json::from_str(text).unwrap();
    assert_eq!(rule.build_query(), input["right"]);
    assert_eq!(rule.variable_value().unwrap(), input["right"]);
}

#[test]
fn judge_fixture_carries_a_default_slot() {
    let rule = parse_str(include_str!("data/judge_default_rule.json")).unwrap();
    assert!(rule.is_final_result());
    assert!(rule.accepts_input());
    let OpNode::Judge { value } = &rule else {
        panic!("expected a judge node");
    };
    assert!(value.is_default());
}

#[test]
fn fixtures_round_trip_through_the_serde_bridge() {
    let text = include_str!("data/count_duration_rule.json");
    let rule: OpNode = serde_json::from_str(text).unwrap();
    assert_eq!(
        serde_json::to_value(&rule).unwrap(),
        serde_json::from_str::<Value>(text).unwrap()
    );
}
