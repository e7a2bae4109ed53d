pub mod crypto;

pub use crypto::caesar::{Caesar, CaesarStep};
pub use crypto::playfair::{Playfair, PlayfairSimulation, PlayfairStep};
pub use crypto::rail_fence::{RailFence, RailFenceSimulation, RailFenceStep};
pub use crypto::simulation::TextSimulation;
pub use crypto::vigenere::{Vigenere, VigenereStep};
