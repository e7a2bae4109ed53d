use classical::crypto::rail_fence::{RailFence, RailFenceStep, MAX_DEPTH};
use lab_core::crypto::cipher_traits::{CipherAlgorithm, Direction, TracedCipher};
use lab_core::crypto::errors::LabError;
use quickcheck::{quickcheck, TestResult};

#[test]
fn test_rail_fence_encrypt() {
    let rail = RailFence::new(3);
    assert_eq!(rail.encrypt("WEAREDISCOVERED").unwrap(), "WRIOREESVEADCED");
    assert_eq!(rail.decrypt("WRIOREESVEADCED").unwrap(), "WEAREDISCOVERED");
}

#[test]
fn test_rail_fence_keeps_spaces_and_pads() {
    let rail = RailFence::new(3);
    let cipher = rail.encrypt("HELLO WORLD").unwrap();
    assert_eq!(cipher, "HLWLEOODL RX");
    assert_eq!(rail.decrypt(&cipher).unwrap(), "HELLO WORLDX");
}

#[test]
fn test_rail_fence_small_depth_is_noop() {
    for depth in [1, 0, -5] {
        let rail = RailFence::new(depth);
        assert_eq!(rail.encrypt("abc").unwrap(), "abc");
        assert_eq!(rail.decrypt("abcd").unwrap(), "abcd");
        let simulation = rail.simulate("abc", Direction::Encrypt).unwrap();
        assert_eq!(simulation.final_result, "abc");
        assert!(matches!(simulation.steps.steps()[0], RailFenceStep::NoOp { .. }));
    }
}

#[test]
fn test_rail_fence_decrypt_length_error() {
    let rail = RailFence::new(3);
    assert_eq!(
        rail.decrypt("ABCD"),
        Err(LabError::RailFenceLength { len: 4, depth: 3 })
    );
    assert!(rail.simulate("ABCD", Direction::Decrypt).unwrap_err().is_input_error());
}

#[test]
fn test_rail_fence_depth_limit() {
    let rail = RailFence::new(MAX_DEPTH as i64 + 1);
    assert!(matches!(rail.encrypt("abc"), Err(LabError::InvalidKey(_))));
}

#[test]
fn test_rail_fence_trace() {
    let simulation = RailFence::new(2).simulate("ABC", Direction::Encrypt).unwrap();
    assert_eq!(simulation.final_result, "ACBX");
    assert_eq!(simulation.input_text, "ABCX");
    assert_eq!(
        simulation.grid,
        vec![vec![Some('A'), Some('C')], vec![Some('B'), Some('X')]]
    );

    let steps = simulation.steps.steps();
    assert!(matches!(steps[0], RailFenceStep::Init { columns: 2, padding: 1, .. }));

    let writes: Vec<_> = steps
        .iter()
        .filter_map(|s| match s {
            RailFenceStep::Write {
                row,
                column,
                current_char,
                ..
            } => Some((*row, *column, *current_char)),
            _ => None,
        })
        .collect();
    assert_eq!(writes.len(), 4);
    assert_eq!((writes[1].0, writes[1].1), (1, 0));
    assert_eq!(writes[0].2, 'A');
    assert_eq!(writes[3], (1, 1, 'X'));

    let reads = steps.iter().filter(|s| matches!(s, RailFenceStep::Read { .. })).count();
    assert_eq!(reads, 4);

    let json = serde_json::to_value(&simulation).unwrap();
    assert_eq!(json["steps"][1]["current_char"], "A");
    assert!(json["steps"][1].get("grid").is_none());
    assert_eq!(json["grid"][1][1], "X");
}

#[test]
fn test_rail_fence_decrypt_trace() {
    let simulation = RailFence::new(2).simulate("ACBX", Direction::Decrypt).unwrap();
    assert_eq!(simulation.final_result, "ABCX");
}

quickcheck! {
    fn rail_fence_round_trip(text: String, depth: u8) -> TestResult {
        let depth = i64::from(depth % 12);
        let len = text.chars().count() as i64;
        if depth > 1 && len % depth != 0 {
            return TestResult::discard();
        }
        let rail = RailFence::new(depth);
        let cipher = rail.encrypt(&text).unwrap();
        TestResult::from_bool(rail.decrypt(&cipher).unwrap() == text)
    }
}
