use lab_core::{Direction, Trace};
use serde_json::json;

#[test]
fn trace_keeps_insertion_order() {
    let mut trace = Trace::new();
    assert!(trace.is_empty());
    trace.push("first");
    trace.push("second");
    trace.extend(["third"]);

    assert_eq!(trace.len(), 3);
    assert_eq!(trace.steps(), &["first", "second", "third"]);
    assert_eq!(trace.last(), Some(&"third"));
    assert_eq!(trace.iter().count(), 3);
}

#[test]
fn trace_serializes_as_array() {
    let mut trace = Trace::new();
    trace.push(1);
    trace.push(2);
    assert_eq!(serde_json::to_value(&trace).unwrap(), json!([1, 2]));
}

#[test]
fn direction_wire_format() {
    assert_eq!(serde_json::to_value(Direction::Decrypt).unwrap(), json!("decrypt"));
    let parsed: Direction = serde_json::from_value(json!("encrypt")).unwrap();
    assert_eq!(parsed, Direction::Encrypt);
    assert_eq!(Direction::default(), Direction::Encrypt);
    assert_eq!(Direction::Decrypt.to_string(), "decrypt");
}
