pub mod crypto;

pub use crypto::des::{Des, DesSimulation, DesSimulator, BLOCK_BYTES};
pub use crypto::des_steps::{DesStep, SBoxLookup, SBoxRound};
