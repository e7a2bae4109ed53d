use classical::crypto::caesar::{Caesar, CaesarStep};
use lab_core::crypto::cipher_traits::{CipherAlgorithm, Direction, SimulationOutput, TracedCipher};
use quickcheck::quickcheck;

#[test]
fn test_caesar_encrypt() {
    let caesar = Caesar::new(3);
    assert_eq!(caesar.encrypt("Hello, World!").unwrap(), "Khoor, Zruog!");
    assert_eq!(caesar.decrypt("Khoor, Zruog!").unwrap(), "Hello, World!");
}

#[test]
fn test_caesar_shift_is_reduced() {
    assert_eq!(Caesar::new(29).encrypt("xyz").unwrap(), "abc");
    assert_eq!(Caesar::new(-1).encrypt("abc").unwrap(), "zab");
    assert_eq!(Caesar::new(26).encrypt("Same").unwrap(), "Same");
    let extreme = Caesar::new(i64::MIN);
    assert_eq!(extreme.decrypt(&extreme.encrypt("Edge").unwrap()).unwrap(), "Edge");
}

#[test]
fn test_caesar_leaves_non_ascii_letters() {
    assert_eq!(Caesar::new(1).encrypt("é ß 1").unwrap(), "é ß 1");
}

#[test]
fn test_caesar_trace() {
    let simulation = Caesar::new(3).simulate("Hi!", Direction::Encrypt).unwrap();
    assert_eq!(simulation.final_output(), "Kl!");
    assert_eq!(simulation.steps.len(), 5);

    match &simulation.steps.steps()[3] {
        CaesarStep::Char { current_char, output_char, intermediate_result, .. } => {
            assert_eq!(*current_char, '!');
            assert_eq!(*output_char, '!');
            assert_eq!(intermediate_result, "Kl!");
        }
        other => panic!("unexpected step {other:?}"),
    }

    let json = serde_json::to_value(&simulation).unwrap();
    assert_eq!(json["final_result"], "Kl!");
    assert_eq!(json["steps"][0]["phase"], "init");
    assert_eq!(json["steps"][1]["output_char"], "K");
}

#[test]
fn test_caesar_decrypt_trace_uses_inverse_shift() {
    let simulation = Caesar::new(3).simulate("Kl!", Direction::Decrypt).unwrap();
    assert_eq!(simulation.final_result, "Hi!");
    assert!(matches!(
        simulation.steps.steps()[0],
        CaesarStep::Init { effective_shift: 23, .. }
    ));
}

quickcheck! {
    fn caesar_round_trip(text: String, shift: i64) -> bool {
        let caesar = Caesar::new(shift);
        caesar.decrypt(&caesar.encrypt(&text).unwrap()).unwrap() == text
    }

    fn caesar_trace_matches_direct(text: String, shift: i64) -> bool {
        let caesar = Caesar::new(shift);
        caesar.simulate(&text, Direction::Encrypt).unwrap().final_result == caesar.encrypt(&text).unwrap()
    }
}
