// src/simulation/engine.rs

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::EngineError;
use crate::simulation::builder::SimulationModel;
use crate::simulation::config::EngineConfig;

/// The external discrete-event engine, seen from this service.
///
/// Construction and the simulation run are separate steps, mirroring the
/// engine's own API. Both are blocking. The result is the engine's raw,
/// loosely typed output; decoding it is the result extractor's job.
pub trait SimulationEngine: Send + Sync + 'static {
    /// Handle to a constructed network, consumed by one run.
    type Network: Send + 'static;

    /// Version string reported by the health probe.
    fn version(&self) -> &str;

    fn create_network(&self, model: SimulationModel) -> Result<Self::Network, EngineError>;

    /// Runs the network for `sim_time` time units.
    fn simulate(
        &self,
        network: Self::Network,
        sim_time: u32,
        logging: bool,
    ) -> Result<Value, EngineError>;
}

/// Runs the engine as a child process speaking JSON over stdin/stdout.
///
/// The child receives `{"model": .., "sim_time": .., "logging": ..}` and must
/// print exactly one JSON object. A non-zero exit status is a failure and its
/// stderr becomes the error message.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    config: EngineConfig,
}

/// A model waiting to be handed to the child process.
#[derive(Debug)]
pub struct PreparedNetwork {
    model: SimulationModel,
}

#[derive(Serialize)]
struct Invocation<'a> {
    model: &'a SimulationModel,
    sim_time: u32,
    logging: bool,
}

// Keeps the error payload readable when an engine dumps a long trace.
const MAX_STDERR_CHARS: usize = 2000;

impl ProcessEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl SimulationEngine for ProcessEngine {
    type Network = PreparedNetwork;

    fn version(&self) -> &str {
        &self.config.version
    }

    fn create_network(&self, model: SimulationModel) -> Result<PreparedNetwork, EngineError> {
        Ok(PreparedNetwork { model })
    }

    fn simulate(
        &self,
        network: PreparedNetwork,
        sim_time: u32,
        logging: bool,
    ) -> Result<Value, EngineError> {
        let payload = serde_json::to_vec(&Invocation {
            model: &network.model,
            sim_time,
            logging,
        })?;

        debug!(command = %self.config.command, bytes = payload.len(), "spawning engine");
        let mut child = Command::new(&self.config.command)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                command: self.config.command.clone(),
                source,
            })?;

        // Feed stdin from its own thread so a chatty child cannot block on a full stdout pipe.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::failed("engine stdin unavailable"))?;
        let writer = thread::spawn(move || stdin.write_all(&payload));

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(result) => {
                // A child that exits without reading stdin reports its own failure below.
                if let Err(err) = result {
                    debug!(error = %err, "engine closed stdin early");
                }
            }
            Err(_) => return Err(EngineError::failed("engine stdin writer panicked")),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr: String = stderr.trim().chars().take(MAX_STDERR_CHARS).collect();
            return Err(EngineError::Exit {
                status: output.status,
                stderr,
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
