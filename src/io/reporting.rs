// src/io/reporting.rs

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::simulation::results::{InventorySeries, Metrics};

/// One inventory observation, flattened for CSV.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryRecord<'a> {
    pub node_id: &'a str,
    pub time: f64,
    pub level: f64,
}

#[derive(Debug, Clone, Serialize)]
struct MetricRecord {
    #[serde(rename = "Metric")]
    metric: &'static str,
    #[serde(rename = "Value")]
    value: f64,
}

/// Writes every inventory series as `node_id,time,level` rows.
///
/// Returns the number of rows written.
pub fn write_inventory<W: Write>(
    writer: W,
    data: &BTreeMap<String, InventorySeries>,
) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for (node_id, series) in data {
        for (time, level) in series.points() {
            wtr.serialize(InventoryRecord {
                node_id,
                time,
                level,
            })?;
            rows += 1;
        }
    }

    wtr.flush()?;
    Ok(rows)
}

/// Writes the metrics as a two-column `Metric,Value` table. Pairs are split
/// into their order and unit components.
pub fn write_metrics<W: Write>(writer: W, metrics: &Metrics) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (metric, value) in metric_rows(metrics) {
        wtr.serialize(MetricRecord { metric, value })?;
    }
    wtr.flush()?;
    Ok(())
}

fn metric_rows(m: &Metrics) -> Vec<(&'static str, f64)> {
    vec![
        ("Profit", m.profit),
        ("Revenue", m.revenue),
        ("Total Cost", m.total_cost),
        ("Inventory Carry Cost", m.inventory_carry_cost),
        ("Inventory Spend Cost", m.inventory_spend_cost),
        ("Transportation Cost", m.transportation_cost),
        ("Available Inventory", m.available_inv as f64),
        ("Average Available Inventory", m.avg_available_inv),
        ("Total Demand (Orders)", m.total_demand[0]),
        ("Total Demand (Units)", m.total_demand[1]),
        ("Demand By Customers (Orders)", m.demand_by_customers[0]),
        ("Demand By Customers (Units)", m.demand_by_customers[1]),
        ("Shortage (Orders)", m.shortage[0]),
        ("Shortage (Units)", m.shortage[1]),
        ("Backorders (Orders)", m.backorders[0]),
        ("Backorders (Units)", m.backorders[1]),
        ("Fulfillment Received (Orders)", m.fulfillment_received_by_customers[0]),
        ("Fulfillment Received (Units)", m.fulfillment_received_by_customers[1]),
        ("Average Cost Per Order", m.avg_cost_per_order),
        ("Average Cost Per Item", m.avg_cost_per_item),
    ]
}

/// Writes the inventory series to a CSV file.
///
/// # Arguments
/// * `file_path` - Where to save the file (e.g., "results/run_1.csv").
/// * `data` - Inventory series keyed by node id, as returned by a simulation.
pub fn write_inventory_log(file_path: &Path, data: &BTreeMap<String, InventorySeries>) -> Result<usize> {
    let file = std::fs::File::create(file_path)?;
    let rows = write_inventory(file, data)?;
    info!(rows, path = %file_path.display(), "exported inventory series");
    Ok(rows)
}

pub fn write_metrics_log(file_path: &Path, metrics: &Metrics) -> Result<()> {
    let file = std::fs::File::create(file_path)?;
    write_metrics(file, metrics)?;
    info!(path = %file_path.display(), "exported metrics");
    Ok(())
}
