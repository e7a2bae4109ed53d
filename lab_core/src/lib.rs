pub mod crypto;

pub use crypto::cipher_traits::{CipherAlgorithm, Direction, SimulationOutput, TracedCipher};
pub use crypto::encryption_transformation::EncryptionTransformation;
pub use crypto::errors::LabError;
pub use crypto::feistel_network::{FeistelNetwork, FeistelRound};
pub use crypto::key_expansion::KeyExpansion;
pub use crypto::trace::Trace;
pub use crypto::utils::Bits;
