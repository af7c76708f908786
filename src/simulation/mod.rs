pub mod builder;
pub mod config;
pub mod engine;
pub mod results;
pub mod runner;
pub mod synthesis;
pub mod topology;
pub mod validation;
