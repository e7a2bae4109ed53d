pub mod gf;
pub mod rijndael;

pub use rijndael::simulator::{AesSimulation, AesSimulator, BLOCK_BYTES};
pub use rijndael::steps::{AesStep, RoundOperation};
