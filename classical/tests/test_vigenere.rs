use classical::crypto::vigenere::{Vigenere, VigenereStep};
use lab_core::crypto::cipher_traits::{CipherAlgorithm, Direction, TracedCipher};
use lab_core::crypto::errors::LabError;
use quickcheck::{quickcheck, TestResult};

#[test]
fn test_vigenere_classic_vector() {
    let vigenere = Vigenere::new("LEMON").unwrap();
    assert_eq!(vigenere.encrypt("ATTACKATDAWN").unwrap(), "LXFOPVEFRNHR");
    assert_eq!(vigenere.decrypt("LXFOPVEFRNHR").unwrap(), "ATTACKATDAWN");
}

#[test]
fn test_vigenere_skips_non_letters_without_advancing() {
    let vigenere = Vigenere::new("lemon").unwrap();
    assert_eq!(vigenere.encrypt("Attack at dawn!").unwrap(), "Lxfopv ef rnhr!");
}

#[test]
fn test_vigenere_key_is_normalized() {
    let vigenere = Vigenere::new("le-mon 42").unwrap();
    assert_eq!(vigenere.normalized_key(), "LEMON");
    assert_eq!(vigenere.encrypt("ATTACKATDAWN").unwrap(), "LXFOPVEFRNHR");
}

#[test]
fn test_vigenere_rejects_key_without_letters() {
    assert!(matches!(Vigenere::new("1234"), Err(LabError::InvalidKey(_))));
    assert!(matches!(Vigenere::new(""), Err(LabError::InvalidKey(_))));
}

#[test]
fn test_vigenere_trace() {
    let simulation = Vigenere::new("KEY").unwrap().simulate("a b", Direction::Encrypt).unwrap();
    assert_eq!(simulation.final_result, "k f");

    let chars: Vec<_> = simulation
        .steps
        .iter()
        .filter_map(|step| match step {
            VigenereStep::Char { key_char_used, key_index, output_char, .. } => {
                Some((*key_char_used, *key_index, *output_char))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        chars,
        vec![(Some('K'), Some(0), 'k'), (None, None, ' '), (Some('E'), Some(1), 'f')]
    );

    let json = serde_json::to_value(&simulation).unwrap();
    assert!(json["steps"][2].get("key_char_used").is_none());
    assert_eq!(json["steps"][3]["key_char_used"], "E");
}

quickcheck! {
    fn vigenere_round_trip(text: String, key: String) -> TestResult {
        match Vigenere::new(&key) {
            Ok(vigenere) => {
                let cipher = vigenere.encrypt(&text).unwrap();
                TestResult::from_bool(vigenere.decrypt(&cipher).unwrap() == text)
            }
            Err(_) => TestResult::discard(),
        }
    }
}
