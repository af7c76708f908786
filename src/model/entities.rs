// src/model/entities.rs

//! Raw materials and products synthesized from the network topology.
//!
//! Derived ids are the owning node's id behind a fixed namespace prefix
//! (`rm_` for raw materials, `prod_` for products). A user node id that
//! already starts with one of these prefixes can collide with a derived id;
//! validation reports such ids as warnings.

use serde::Serialize;

use crate::model::graph::Node;

pub const RAW_MATERIAL_PREFIX: &str = "rm_";
pub const PRODUCT_PREFIX: &str = "prod_";

/// Units of each raw material consumed per unit of product.
pub const RAW_MATERIAL_USAGE: u32 = 2;

const EXTRACTION_QUANTITY: u64 = 1000;
const EXTRACTION_TIME: f64 = 1.0;
const MINING_COST: f64 = 0.5;
const UNIT_COST: f64 = 0.8;

pub fn raw_material_id(owner_id: &str) -> String {
    format!("{RAW_MATERIAL_PREFIX}{owner_id}")
}

pub fn product_id(factory_id: &str) -> String {
    format!("{PRODUCT_PREFIX}{factory_id}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawMaterial {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub extraction_quantity: u64,
    pub extraction_time: f64,
    pub mining_cost: f64,
    pub cost: f64,
}

impl RawMaterial {
    /// Raw material owned by `owner`. The economics are fixed and never taken
    /// from the node's attributes.
    pub fn for_owner(owner: &Node) -> Self {
        Self {
            id: raw_material_id(&owner.id),
            name: format!("RawMat_{}", owner.label()),
            extraction_quantity: EXTRACTION_QUANTITY,
            extraction_time: EXTRACTION_TIME,
            mining_cost: MINING_COST,
            cost: UNIT_COST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requirement {
    pub raw_material: RawMaterial,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub manufacturing_cost: f64,
    pub manufacturing_time: f64,
    pub batch_size: u64,
    pub raw_materials: Vec<Requirement>,
    pub sell_price: f64,
}

impl Product {
    pub fn for_factory(factory: &Node, raw_materials: Vec<Requirement>) -> Self {
        Self {
            id: product_id(&factory.id),
            name: format!("Product_{}", factory.label()),
            manufacturing_cost: factory.data.manufacturing_cost,
            manufacturing_time: factory.data.manufacturing_time,
            batch_size: factory.data.batch_size,
            raw_materials,
            sell_price: factory.data.sell_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::{NodeData, NodeKind};

    #[test]
    fn raw_material_ignores_node_economics() {
        let mut data = NodeData::new(NodeKind::Supplier, "Mine");
        data.holding_cost = 9.0;
        data.manufacturing_cost = 99.0;
        let supplier = Node { id: "S1".into(), data };

        let rm = RawMaterial::for_owner(&supplier);
        assert_eq!(rm.id, "rm_S1");
        assert_eq!(rm.name, "RawMat_Mine");
        assert_eq!(rm.extraction_quantity, 1000);
        assert_eq!(rm.extraction_time, 1.0);
        assert_eq!(rm.mining_cost, 0.5);
        assert_eq!(rm.cost, 0.8);
    }

    #[test]
    fn product_takes_factory_economics() {
        let mut data = NodeData::new(NodeKind::Factory, "Plant");
        data.manufacturing_cost = 12.5;
        data.batch_size = 250;
        data.sell_price = 99.0;
        let factory = Node { id: "F1".into(), data };

        let product = Product::for_factory(&factory, Vec::new());
        assert_eq!(product.id, "prod_F1");
        assert_eq!(product.name, "Product_Plant");
        assert_eq!(product.manufacturing_cost, 12.5);
        assert_eq!(product.manufacturing_time, 1.0);
        assert_eq!(product.batch_size, 250);
        assert_eq!(product.sell_price, 99.0);
    }
}
