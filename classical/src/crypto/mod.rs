pub mod alphabet;
pub mod caesar;
pub mod playfair;
pub mod rail_fence;
pub mod simulation;
pub mod vigenere;
