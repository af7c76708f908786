// src/model/graph.rs

use serde::{Deserialize, Serialize};

/// The four kinds of node the network editor can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Supplier,
    Factory,
    Distributor,
    Retailer,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Supplier,
        NodeKind::Factory,
        NodeKind::Distributor,
        NodeKind::Retailer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Supplier => "supplier",
            NodeKind::Factory => "factory",
            NodeKind::Distributor => "distributor",
            NodeKind::Retailer => "retailer",
        }
    }
}

/// A node as drawn by the caller. The editor nests every attribute under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub data: NodeData,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.data.node_type
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }
}

/// Node attributes. Anything the caller leaves out takes the editor's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "nodeType")]
    pub node_type: NodeKind,

    // Inventory
    #[serde(default = "defaults::capacity")]
    pub capacity: u64,
    #[serde(default = "defaults::initial_level")]
    pub initial_level: u64,
    #[serde(default = "defaults::holding_cost")]
    pub holding_cost: f64,

    // Manufacturing (factories only)
    #[serde(default = "defaults::manufacturing_cost")]
    pub manufacturing_cost: f64,
    #[serde(default = "defaults::manufacturing_time")]
    pub manufacturing_time: f64,
    #[serde(default = "defaults::batch_size")]
    pub batch_size: u64,

    // Replenishment. The policy string is parsed when the model is built.
    #[serde(default = "defaults::replenishment_policy")]
    pub replenishment_policy: String,
    #[serde(default = "defaults::policy_s")]
    pub policy_s: u64,
    #[serde(rename = "policy_S", default = "defaults::policy_big_s")]
    pub policy_big_s: u64,
    #[serde(rename = "policy_R", default = "defaults::policy_r")]
    pub policy_r: u64,
    #[serde(rename = "policy_Q", default = "defaults::policy_q")]
    pub policy_q: u64,

    // Pricing
    #[serde(default = "defaults::buy_price")]
    pub buy_price: f64,
    #[serde(default = "defaults::sell_price")]
    pub sell_price: f64,
}

impl NodeData {
    /// Attributes for a freshly placed node of the given kind.
    pub fn new(node_type: NodeKind, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            node_type,
            capacity: defaults::capacity(),
            initial_level: defaults::initial_level(),
            holding_cost: defaults::holding_cost(),
            manufacturing_cost: defaults::manufacturing_cost(),
            manufacturing_time: defaults::manufacturing_time(),
            batch_size: defaults::batch_size(),
            replenishment_policy: defaults::replenishment_policy(),
            policy_s: defaults::policy_s(),
            policy_big_s: defaults::policy_big_s(),
            policy_r: defaults::policy_r(),
            policy_q: defaults::policy_q(),
            buy_price: defaults::buy_price(),
            sell_price: defaults::sell_price(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub data: EdgeData,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub cost: f64,
    pub lead_time: f64,
}

/// A recurring order stream attached to one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    pub id: String,
    pub name: String,
    pub target_node: String,
    pub arrival_interval: f64,
    pub order_quantity: u64,
    // Accepted for compatibility with the editor, never forwarded to the engine.
    #[serde(default = "defaults::delivery_cost")]
    pub delivery_cost: f64,
    #[serde(default = "defaults::demand_lead_time")]
    pub lead_time: f64,
}

/// Body of `POST /simulate` and the format of exported network files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub nodes: Vec<Node>,
    // Exported editor files call these `edges`.
    #[serde(alias = "edges", default)]
    pub links: Vec<Edge>,
    #[serde(default)]
    pub demands: Vec<Demand>,
    #[serde(default = "defaults::sim_time")]
    pub sim_time: u32,
}

mod defaults {
    pub fn capacity() -> u64 {
        10_000
    }
    pub fn initial_level() -> u64 {
        10_000
    }
    pub fn holding_cost() -> f64 {
        0.22
    }
    pub fn manufacturing_cost() -> f64 {
        20.0
    }
    pub fn manufacturing_time() -> f64 {
        1.0
    }
    pub fn batch_size() -> u64 {
        1000
    }
    pub fn replenishment_policy() -> String {
        "SS".to_string()
    }
    pub fn policy_s() -> u64 {
        400
    }
    pub fn policy_big_s() -> u64 {
        1000
    }
    pub fn policy_r() -> u64 {
        7
    }
    pub fn policy_q() -> u64 {
        500
    }
    pub fn buy_price() -> f64 {
        150.0
    }
    pub fn sell_price() -> f64 {
        300.0
    }
    pub fn delivery_cost() -> f64 {
        10.0
    }
    pub fn demand_lead_time() -> f64 {
        5.0
    }
    pub fn sim_time() -> u32 {
        30
    }
}
