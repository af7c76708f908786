//! Error types for the simulation service
//!
//! - **ModelError**: the request graph cannot be turned into a simulation model
//! - **EngineError**: the external engine could not build or run the model
//! - **ExtractError**: the engine returned a result we cannot decode
//! - **Error**: crate-wide wrapper, with `Result<T>` alias

use std::process::ExitStatus;

use thiserror::Error;

use crate::simulation::validation::Issue;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// A replenishment policy name other than `SS` or `RQ`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown replenishment policy '{0}' (expected SS or RQ)")]
pub struct ParsePolicyError(pub String);

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("unknown replenishment policy '{policy}' on node {node_id}")]
    UnknownPolicy { node_id: String, policy: String },

    /// Validation found at least one error-level issue.
    #[error("invalid network: {}", summarize(.issues))]
    InvalidNetwork { issues: Vec<Issue> },
}

fn summarize(issues: &[Issue]) -> String {
    match issues {
        [] => "no issues".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to start engine `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("engine i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine exited with {status}: {stderr}")]
    Exit { status: ExitStatus, stderr: String },

    #[error("engine produced unreadable output: {0}")]
    Output(#[from] serde_json::Error),

    /// Failure reported by the engine itself.
    #[error("{0}")]
    Failed(String),
}

impl EngineError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("result is not an object")]
    NotAnObject,

    #[error("malformed result: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Should not occur in normal operation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
