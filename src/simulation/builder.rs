// src/simulation/builder.rs

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ModelError;
use crate::model::entities::{Product, RawMaterial};
use crate::model::graph::{Demand, Edge, Node, NodeKind, SimulationRequest};
use crate::simulation::synthesis::{synthesize, Synthesis};
use crate::simulation::topology::analyze;
use crate::simulation::validation::validate;
use crate::strategy::generator::{Constant, GeneratorSpec, ValueGenerator};
use crate::strategy::policy::ReplenishmentPolicy;

/// Inventory attributes shared by every stocking node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stock {
    pub capacity: u64,
    pub initial_level: u64,
    pub inventory_holding_cost: f64,
}

impl Stock {
    fn of(node: &Node) -> Self {
        Self {
            capacity: node.data.capacity,
            initial_level: node.data.initial_level,
            inventory_holding_cost: node.data.holding_cost,
        }
    }
}

/// One node as the engine constructs it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node_type", rename_all = "snake_case")]
pub enum EngineNode {
    InfiniteSupplier {
        #[serde(rename = "ID")]
        id: String,
        name: String,
    },
    Supplier {
        #[serde(rename = "ID")]
        id: String,
        name: String,
        #[serde(flatten)]
        stock: Stock,
        raw_material: RawMaterial,
    },
    Factory {
        #[serde(rename = "ID")]
        id: String,
        name: String,
        #[serde(flatten)]
        stock: Stock,
        #[serde(flatten)]
        policy: ReplenishmentPolicy,
        product: Product,
        product_sell_price: f64,
    },
    Distributor {
        #[serde(rename = "ID")]
        id: String,
        name: String,
        #[serde(flatten)]
        stock: Stock,
        #[serde(flatten)]
        policy: ReplenishmentPolicy,
        product_buy_price: f64,
        product_sell_price: f64,
    },
    Retailer {
        #[serde(rename = "ID")]
        id: String,
        name: String,
        #[serde(flatten)]
        stock: Stock,
        #[serde(flatten)]
        policy: ReplenishmentPolicy,
        product_buy_price: f64,
        product_sell_price: f64,
    },
}

impl EngineNode {
    pub fn id(&self) -> &str {
        match self {
            EngineNode::InfiniteSupplier { id, .. }
            | EngineNode::Supplier { id, .. }
            | EngineNode::Factory { id, .. }
            | EngineNode::Distributor { id, .. }
            | EngineNode::Retailer { id, .. } => id,
        }
    }

    /// The engine's type label for this node.
    pub fn type_label(&self) -> &'static str {
        match self {
            EngineNode::InfiniteSupplier { .. } => "infinite_supplier",
            EngineNode::Supplier { .. } => "supplier",
            EngineNode::Factory { .. } => "factory",
            EngineNode::Distributor { .. } => "distributor",
            EngineNode::Retailer { .. } => "retailer",
        }
    }

    pub fn product(&self) -> Option<&Product> {
        match self {
            EngineNode::Factory { product, .. } => Some(product),
            _ => None,
        }
    }
}

/// A transport link between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    #[serde(rename = "ID")]
    pub id: String,
    pub source: String,
    pub sink: String,
    pub cost: f64,
    pub lead_time: GeneratorSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandRecord {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub order_arrival_model: GeneratorSpec,
    pub order_quantity_model: GeneratorSpec,
    pub demand_node: String,
}

/// Everything the engine needs to construct the network. Built once per
/// request and handed over whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationModel {
    pub nodes: Vec<EngineNode>,
    pub links: Vec<Link>,
    pub demands: Vec<DemandRecord>,
}

impl SimulationModel {
    pub fn node(&self, id: &str) -> Option<&EngineNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }
}

/// Validates the request, then translates it.
///
/// Fails with every error-level validation issue when the network has dangling
/// references or out-of-range values.
pub fn build_model(request: &SimulationRequest) -> Result<SimulationModel, ModelError> {
    let report = validate(request);
    for issue in report.warnings() {
        warn!(%issue, "network warning");
    }
    if !report.valid {
        return Err(ModelError::InvalidNetwork {
            issues: report.errors().cloned().collect(),
        });
    }
    translate(&request.nodes, &request.links, &request.demands)
}

/// Translates a graph into engine records without any referential checks.
pub fn translate(
    nodes: &[Node],
    edges: &[Edge],
    demands: &[Demand],
) -> Result<SimulationModel, ModelError> {
    let topology = analyze(nodes, edges);
    let synthesis = synthesize(nodes, &topology);

    info!(
        finite_suppliers = topology.finite_suppliers().len(),
        products = synthesis.products.len(),
        fallback_raw_materials = synthesis.fallback_factories.len(),
        "analyzed network topology"
    );

    let nodes = nodes
        .iter()
        .map(|node| engine_node(node, &synthesis))
        .collect::<Result<Vec<_>, _>>()?;

    let links = edges
        .iter()
        .map(|edge| Link {
            id: edge.id.clone(),
            source: edge.source.clone(),
            sink: edge.target.clone(),
            cost: edge.data.cost,
            lead_time: Constant::new(edge.data.lead_time).describe(),
        })
        .collect();

    let demands = demands
        .iter()
        .map(|demand| DemandRecord {
            id: demand.id.clone(),
            name: demand.name.clone(),
            order_arrival_model: Constant::new(demand.arrival_interval).describe(),
            order_quantity_model: Constant::new(demand.order_quantity as f64).describe(),
            demand_node: demand.target_node.clone(),
        })
        .collect();

    Ok(SimulationModel {
        nodes,
        links,
        demands,
    })
}

fn engine_node(node: &Node, synthesis: &Synthesis) -> Result<EngineNode, ModelError> {
    let id = node.id.clone();
    let name = node.label().to_string();
    let data = &node.data;

    let engine_node = match node.kind() {
        NodeKind::Supplier => match synthesis.raw_material_for(&node.id) {
            Some(raw_material) => EngineNode::Supplier {
                id,
                name,
                stock: Stock::of(node),
                raw_material: raw_material.clone(),
            },
            None => EngineNode::InfiniteSupplier { id, name },
        },
        NodeKind::Factory => {
            let product = synthesis.product_for(node);
            EngineNode::Factory {
                id,
                name,
                stock: Stock::of(node),
                policy: ReplenishmentPolicy::from_node(&node.id, data)?,
                product,
                product_sell_price: data.sell_price,
            }
        }
        NodeKind::Distributor => EngineNode::Distributor {
            id,
            name,
            stock: Stock::of(node),
            policy: ReplenishmentPolicy::from_node(&node.id, data)?,
            product_buy_price: data.buy_price,
            product_sell_price: data.sell_price,
        },
        NodeKind::Retailer => EngineNode::Retailer {
            id,
            name,
            stock: Stock::of(node),
            policy: ReplenishmentPolicy::from_node(&node.id, data)?,
            product_buy_price: data.buy_price,
            product_sell_price: data.sell_price,
        },
    };

    debug!(node = %node.id, kind = engine_node.type_label(), "translated node");
    Ok(engine_node)
}
