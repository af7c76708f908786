// src/simulation/results.rs

//! Decoding of the engine's output into the API contract.
//!
//! The engine result is a loosely typed object. It is decoded once through
//! [`EngineReport`], where every field carries its default, so nothing
//! downstream needs to guess about missing keys.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExtractError;

/// Aggregate performance figures, in the order the API has always listed them.
///
/// Pairs are `[orders, units]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    #[serde(deserialize_with = "lenient::float")]
    pub profit: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub revenue: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub total_cost: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub inventory_carry_cost: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub inventory_spend_cost: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub transportation_cost: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub available_inv: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub avg_available_inv: f64,
    #[serde(deserialize_with = "lenient::pair")]
    pub total_demand: [f64; 2],
    #[serde(deserialize_with = "lenient::pair")]
    pub demand_by_customers: [f64; 2],
    #[serde(deserialize_with = "lenient::pair")]
    pub shortage: [f64; 2],
    #[serde(deserialize_with = "lenient::pair")]
    pub backorders: [f64; 2],
    #[serde(deserialize_with = "lenient::pair")]
    pub fulfillment_received_by_customers: [f64; 2],
    #[serde(deserialize_with = "lenient::float")]
    pub avg_cost_per_order: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub avg_cost_per_item: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub num_of_nodes: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub num_of_links: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub num_suppliers: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub num_distributors: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub num_manufacturers: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub num_retailers: u64,
}

/// Inventory level history of one node, as parallel sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventorySeries {
    pub time: Vec<f64>,
    pub level: Vec<f64>,
}

impl InventorySeries {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.level.iter().copied())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct InventoryReport {
    #[serde(deserialize_with = "lenient::points")]
    instantaneous_levels: Vec<(f64, f64)>,
}

/// Schema of the engine's result object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EngineReport {
    #[serde(flatten)]
    metrics: Metrics,
    nodes: Option<BTreeMap<String, Value>>,
}

/// Metrics plus per-node inventory series, ready for the response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationOutput {
    pub metrics: Metrics,
    pub inventory_data: BTreeMap<String, InventorySeries>,
}

/// Decodes an engine result.
///
/// Absent or `null` fields take their zero default. A field present with a
/// value that cannot be read as the expected type fails the whole extraction.
pub fn extract(result: Value) -> Result<SimulationOutput, ExtractError> {
    if !result.is_object() {
        return Err(ExtractError::NotAnObject);
    }
    let report: EngineReport = serde_json::from_value(result)?;

    let mut inventory_data = BTreeMap::new();
    for (id, node) in report.nodes.unwrap_or_default() {
        if let Some(series) = node_series(&node)? {
            inventory_data.insert(id, series);
        }
    }

    Ok(SimulationOutput {
        metrics: report.metrics,
        inventory_data,
    })
}

/// Level history of one engine node entry, if it has one worth reporting.
///
/// Infinite nodes are skipped before their inventory is looked at. Entries that
/// are not objects, and inventories that are missing or not objects, have no
/// history. A history that is present but unreadable fails the extraction.
fn node_series(node: &Value) -> Result<Option<InventorySeries>, ExtractError> {
    let Some(fields) = node.as_object() else {
        return Ok(None);
    };
    if fields.get("node_type").is_some_and(is_infinite_type) {
        return Ok(None);
    }
    let Some(inventory) = fields.get("inventory").filter(|v| v.is_object()) else {
        return Ok(None);
    };

    let levels = InventoryReport::deserialize(inventory)?.instantaneous_levels;
    if levels.is_empty() {
        return Ok(None);
    }
    let (time, level) = levels.into_iter().unzip();
    Ok(Some(InventorySeries { time, level }))
}

fn is_infinite_type(node_type: &Value) -> bool {
    let label = match node_type {
        Value::String(s) => s.to_lowercase(),
        other => other.to_string().to_lowercase(),
    };
    label.contains("infinite")
}

/// Field decoders that treat `null` as absent and coerce numeric strings.
mod lenient {
    use super::*;

    fn number<E: de::Error>(value: &Value) -> Result<Option<f64>, E> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| E::custom(format!("number {n} out of range"))),
            Value::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("expected a number, found \"{s}\""))),
            other => Err(E::custom(format!("expected a number, found {other}"))),
        }
    }

    pub fn float<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(number::<D::Error>(&value)?.unwrap_or_default())
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(number::<D::Error>(&value)?.map(|n| n.trunc() as i64).unwrap_or_default())
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        let value = Value::deserialize(d)?;
        match number::<D::Error>(&value)? {
            Some(n) if n < 0.0 => Err(de::Error::custom(format!("negative count {n}"))),
            Some(n) => Ok(n.trunc() as u64),
            None => Ok(0),
        }
    }

    pub fn pair<'de, D: Deserializer<'de>>(d: D) -> Result<[f64; 2], D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok([0.0, 0.0]),
            Value::Array(items) if items.len() == 2 => Ok([
                number::<D::Error>(&items[0])?.unwrap_or_default(),
                number::<D::Error>(&items[1])?.unwrap_or_default(),
            ]),
            other => Err(de::Error::custom(format!("expected a pair, found {other}"))),
        }
    }

    pub fn points<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<(f64, f64)>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .iter()
                .map(|item| -> Result<(f64, f64), D::Error> {
                    match item.as_array().map(Vec::as_slice) {
                        Some([time, level, ..]) => Ok((
                            number::<D::Error>(time)?.unwrap_or_default(),
                            number::<D::Error>(level)?.unwrap_or_default(),
                        )),
                        _ => Err(de::Error::custom(format!(
                            "expected a (time, level) pair, found {item}"
                        ))),
                    }
                })
                .collect(),
            other => Err(de::Error::custom(format!(
                "expected a level history, found {other}"
            ))),
        }
    }
}
