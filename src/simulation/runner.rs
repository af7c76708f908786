// src/simulation/runner.rs

use tracing::info;

use crate::error::Result;
use crate::model::graph::SimulationRequest;
use crate::simulation::builder::build_model;
use crate::simulation::engine::SimulationEngine;
use crate::simulation::results::{extract, SimulationOutput};

/// One full build-and-simulate cycle. Any failure along the way aborts the run;
/// there is no partial output.
pub fn run_simulation<E: SimulationEngine>(
    engine: &E,
    request: &SimulationRequest,
    logging: bool,
) -> Result<SimulationOutput> {
    info!(
        nodes = request.nodes.len(),
        links = request.links.len(),
        demands = request.demands.len(),
        sim_time = request.sim_time,
        "simulation started"
    );

    let model = build_model(request)?;
    let network = engine.create_network(model)?;
    info!("network created");

    let raw = engine.simulate(network, request.sim_time, logging)?;
    let output = extract(raw)?;

    info!(
        profit = output.metrics.profit,
        revenue = output.metrics.revenue,
        total_cost = output.metrics.total_cost,
        inventory_series = output.inventory_data.len(),
        "simulation finished"
    );
    Ok(output)
}
