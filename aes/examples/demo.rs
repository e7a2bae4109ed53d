//! Prints the traced AES run for a text/key pair given on the command line.
//!
//!     cargo run -p aes_sim --example demo -- "TOPSECRETTEXT!!" "SIXTEENBYTEKEY!!"

use aes_sim::rijndael::simulator::AesSimulator;
use aes_sim::rijndael::steps::AesStep;
use lab_core::crypto::cipher_traits::{Direction, TracedCipher};

fn main() {
    let mut args = std::env::args().skip(1);
    let text = args.next().unwrap_or_else(|| "TOPSECRETTEXT!!".to_string());
    let key = args.next().unwrap_or_else(|| "SIXTEENBYTEKEY!!".to_string());

    let simulation = match AesSimulator::new(&key).simulate(&text, Direction::Encrypt) {
        Ok(simulation) => simulation,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            std::process::exit(1);
        }
    };

    for step in simulation.steps.iter() {
        match step {
            AesStep::KeySchedule { step, description, word, .. } => {
                println!("{step:>6}  {word}  {description}");
            }
            AesStep::Round { description, state, .. } => {
                println!("{description}");
                for row in state.rows() {
                    println!("        {:02x} {:02x} {:02x} {:02x}", row[0], row[1], row[2], row[3]);
                }
            }
            _ => {}
        }
    }
    println!("ciphertext: {}", simulation.final_result_hex);

    if std::env::var_os("AES_DEMO_JSON").is_some() {
        match serde_json::to_string_pretty(&simulation) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("serialization failed: {err}"),
        }
    }
}
