pub mod des;
pub mod des_key_expansion;
pub mod des_steps;
pub mod des_tables;
pub mod des_transformation;
