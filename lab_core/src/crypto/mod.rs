pub mod cipher_traits;
pub mod encryption_transformation;
pub mod errors;
pub mod feistel_network;
pub mod key_expansion;
pub mod trace;
pub mod utils;
