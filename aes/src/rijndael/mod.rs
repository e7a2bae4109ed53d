pub mod cipher;
pub mod key_schedule;
pub mod sbox;
pub mod simulator;
pub mod state;
pub mod steps;
