pub mod generator;
pub mod policy;
