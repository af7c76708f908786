// src/io/request.rs

use std::path::Path;

use crate::error::Result;
use crate::model::graph::SimulationRequest;

/// Reads a network from a JSON file, either a `/simulate` request body or a
/// network exported from the editor.
pub fn load_request(path: &Path) -> Result<SimulationRequest> {
    let text = std::fs::read_to_string(path)?;
    parse_request(&text)
}

pub fn parse_request(text: &str) -> Result<SimulationRequest> {
    Ok(serde_json::from_str(text)?)
}
