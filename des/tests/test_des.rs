use des_sim::crypto::des::{Des, DesSimulator};
use des_sim::crypto::des_steps::DesStep;
use hex_literal::hex;
use lab_core::crypto::cipher_traits::{CipherAlgorithm, Direction, SimulationOutput, TracedCipher};
use lab_core::crypto::errors::LabError;
use lab_core::crypto::trace::Trace;
use lab_core::crypto::utils::{bits_to_bytes, bits_to_hex, bytes_to_bits};

#[test]
fn test_des_nist_vector() {
    let key = bytes_to_bits(&hex!("13 34 57 79 9B BC DF F1"));
    let plaintext = bytes_to_bits(&hex!("01 23 45 67 89 AB CD EF"));
    let expected_ciphertext = hex!("85 E8 13 54 0F 0A B4 05");

    let des = Des::new();
    let ciphertext = des.encrypt_block(&plaintext, &key).unwrap();
    assert_eq!(bits_to_bytes(&ciphertext), expected_ciphertext);

    let decrypted = des.decrypt_block(&ciphertext, &key).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_des_round_keys() {
    let key = bytes_to_bits(&hex!("13 34 57 79 9B BC DF F1"));
    let mut trace = Trace::new();
    let round_keys = Des::new().round_keys(&key, &mut trace).unwrap();

    assert_eq!(round_keys.len(), 16);
    assert!(round_keys.iter().all(|k| k.len() == 48));
    assert_eq!(bits_to_hex(&round_keys[0]), "1B02EFFC7072");
    assert_eq!(bits_to_hex(&round_keys[15]), "CB3D8B0E17F5");

    // PC-1, разбиение и 16 сдвигов
    assert_eq!(trace.len(), 18);
}

#[test]
fn test_des_rejects_short_blocks() {
    let des = Des::new();
    let key = bytes_to_bits(b"12345678");
    let result = des.encrypt_block(&bytes_to_bits(b"1234"), &key);
    assert_eq!(result, Err(LabError::LengthMismatch { left: 32, right: 64 }));
}

#[test]
fn test_text_vectors() {
    let cases = [
        ("ABCDEFGH", "SECRETKY", "A60653D2740B9EFF"),
        ("HELLO", "KEY", "875BBED6FDD5C306"),
        ("PASSWORD", "12345678", "262EA5C966C5E480"),
    ];
    for (text, key, expected) in cases {
        let simulator = DesSimulator::new(key);
        assert_eq!(simulator.encrypt(text).unwrap(), expected);
        let simulation = simulator.simulate(text, Direction::Encrypt).unwrap();
        assert_eq!(simulation.final_result_hex, expected);
        assert_eq!(simulation.final_output(), expected);
    }
}

#[test]
fn test_long_input_is_truncated() {
    let simulator = DesSimulator::new("SECRETKY-and-more");
    assert_eq!(simulator.encrypt("ABCDEFGHIJKLMNOP").unwrap(), "A60653D2740B9EFF");
}

#[test]
fn test_decrypt_restores_text() {
    let simulator = DesSimulator::new("KEY");
    assert_eq!(simulator.decrypt("875BBED6FDD5C306").unwrap(), "HELLO");
    assert_eq!(simulator.decrypt("875bbed6fdd5c306").unwrap(), "HELLO");

    let simulation = simulator.simulate("875BBED6FDD5C306", Direction::Decrypt).unwrap();
    assert_eq!(simulation.final_result_text.as_deref(), Some("HELLO"));
    assert_eq!(simulation.final_result_hex, "48454C4C4F202020");
}

#[test]
fn test_decrypt_rejects_malformed_hex() {
    let simulator = DesSimulator::new("KEY");
    assert!(matches!(
        simulator.simulate("not-hex", Direction::Decrypt),
        Err(LabError::InvalidHex { expected: 16, .. })
    ));
    assert!(simulator.decrypt("875BBED6").unwrap_err().is_input_error());
}

#[test]
fn test_trace_completeness() {
    let simulation = DesSimulator::new("SECRETKY")
        .simulate("ABCDEFGH", Direction::Encrypt)
        .unwrap();

    let count = |pred: fn(&DesStep) -> bool| simulation.steps.iter().filter(|&s| pred(s)).count();
    assert_eq!(count(|s| matches!(s, DesStep::Round { .. })), 16);
    assert_eq!(count(|s| matches!(s, DesStep::KeyRound { .. })), 16);
    assert_eq!(count(|s| matches!(s, DesStep::KeyPermutation { .. })), 1);
    assert_eq!(count(|s| matches!(s, DesStep::InitialPermutation { .. })), 1);
    assert_eq!(count(|s| matches!(s, DesStep::Swap { .. })), 1);
    assert!(matches!(simulation.steps.steps()[0], DesStep::Preprocess { .. }));
    assert!(matches!(simulation.steps.last(), Some(DesStep::FinalPermutation { .. })));

    assert_eq!(simulation.s_box_traces.len(), 16);
    for round in &simulation.s_box_traces {
        assert_eq!(round.details.len(), 8);
        assert_eq!(round.full_output.len(), 32);
        for lookup in &round.details {
            assert_eq!(lookup.input.len(), 6);
            assert_eq!(lookup.output.len(), 4);
            assert!(lookup.row < 4 && lookup.column < 16);
            assert_eq!(lookup.row_bits.len(), 2);
            assert_eq!(lookup.column_bits.len(), 4);
        }
    }
}

#[test]
fn test_rounds_are_chained() {
    let simulation = DesSimulator::new("KEY").simulate("HELLO", Direction::Encrypt).unwrap();
    let rounds: Vec<_> = simulation
        .steps
        .iter()
        .filter_map(|s| match s {
            DesStep::Round { left_in, right_in, left, right, .. } => Some((left_in, right_in, left, right)),
            _ => None,
        })
        .collect();

    for pair in rounds.windows(2) {
        assert_eq!(pair[1].0, pair[0].2);
        assert_eq!(pair[1].1, pair[0].3);
    }
    for (_, right_in, left, _) in &rounds {
        assert_eq!(right_in, left);
    }
}

#[test]
fn test_simulation_json_shape() {
    let simulation = DesSimulator::new("KEY").simulate("HELLO", Direction::Encrypt).unwrap();
    let json = serde_json::to_value(&simulation).unwrap();

    assert_eq!(json["final_result_hex"], "875BBED6FDD5C306");
    assert_eq!(json["direction"], "encrypt");
    assert!(json.get("final_result_text").is_none());
    assert_eq!(json["steps"][0]["phase"], "preprocess");
    assert_eq!(json["steps"][1]["phase"], "key_permutation");
    assert_eq!(json["s_box_traces"][0]["details"][0]["sbox"], 1);
}

mod properties {
    use des_sim::crypto::des::DesSimulator;
    use lab_core::crypto::cipher_traits::CipherAlgorithm;
    use quickcheck::quickcheck;

    quickcheck! {
        fn ascii_text_round_trips(text: String, key: String) -> bool {
            let text: String = text.chars().filter(|c| c.is_ascii_graphic()).take(8).collect();
            let simulator = DesSimulator::new(&key);
            match simulator.encrypt(&text) {
                Ok(hex) => simulator.decrypt(&hex).map(|plain| plain == text).unwrap_or(false),
                Err(_) => false,
            }
        }
    }
}
