// src/strategy/generator.rs

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A source of values the engine draws from while it runs:
/// link lead times, order inter-arrival times, order sizes.
///
/// We require `Send` + `Sync` so an engine can move generators across threads.
pub trait ValueGenerator: Debug + Send + Sync {
    /// Produces the next value of the stream.
    fn next_value(&mut self) -> f64;

    /// Serializable form carried in the simulation model.
    fn describe(&self) -> GeneratorSpec;
}

/// Always yields the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl ValueGenerator for Constant {
    fn next_value(&mut self) -> f64 {
        self.value
    }

    fn describe(&self) -> GeneratorSpec {
        GeneratorSpec::Constant { value: self.value }
    }
}

/// Serializable description of a generator, as carried in the simulation model.
///
/// The API only accepts constant values today. New distributions are added as
/// variants here without touching the link or demand records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratorSpec {
    Constant { value: f64 },
}
