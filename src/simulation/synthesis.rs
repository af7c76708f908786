// src/simulation/synthesis.rs

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::entities::{Product, RawMaterial, Requirement, RAW_MATERIAL_USAGE};
use crate::model::graph::{Node, NodeKind};
use crate::simulation::topology::Topology;

/// Entities derived from the topology, keyed by the id of the node owning them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Synthesis {
    /// One per finite supplier.
    pub raw_materials: HashMap<String, RawMaterial>,
    /// One per factory.
    pub products: HashMap<String, Product>,
    /// Factories that received a fabricated raw material because nothing feeds them.
    pub fallback_factories: Vec<String>,
}

impl Synthesis {
    pub fn raw_material_for(&self, supplier_id: &str) -> Option<&RawMaterial> {
        self.raw_materials.get(supplier_id)
    }

    /// Product made by `factory`. A factory this synthesis never saw has no
    /// known feeders and makes its product from a raw material of its own.
    pub fn product_for(&self, factory: &Node) -> Product {
        self.products
            .get(&factory.id)
            .cloned()
            .unwrap_or_else(|| Product::for_factory(factory, vec![own_raw_material(factory)]))
    }
}

fn own_raw_material(factory: &Node) -> Requirement {
    Requirement {
        raw_material: RawMaterial::for_owner(factory),
        quantity: RAW_MATERIAL_USAGE,
    }
}

/// Materializes raw materials for finite suppliers and one product per factory.
pub fn synthesize(nodes: &[Node], topology: &Topology) -> Synthesis {
    let mut synthesis = Synthesis::default();

    for node in nodes.iter().filter(|n| n.kind() == NodeKind::Supplier) {
        if topology.is_finite(&node.id) && !synthesis.raw_materials.contains_key(&node.id) {
            let raw_material = RawMaterial::for_owner(node);
            debug!(supplier = %node.id, raw_material = %raw_material.id, "created raw material");
            synthesis.raw_materials.insert(node.id.clone(), raw_material);
        }
    }

    for node in nodes.iter().filter(|n| n.kind() == NodeKind::Factory) {
        if synthesis.products.contains_key(&node.id) {
            continue;
        }

        let mut requirements: Vec<Requirement> = topology
            .feeders_of(&node.id)
            .iter()
            .filter_map(|supplier_id| synthesis.raw_materials.get(supplier_id))
            .map(|raw_material| Requirement {
                raw_material: raw_material.clone(),
                quantity: RAW_MATERIAL_USAGE,
            })
            .collect();

        if requirements.is_empty() {
            // Scoped to this factory only; never offered to other factories.
            warn!(factory = %node.id, "no supplier feeds factory, using a default raw material");
            requirements.push(own_raw_material(node));
            synthesis.fallback_factories.push(node.id.clone());
        }

        let product = Product::for_factory(node, requirements);
        debug!(
            factory = %node.id,
            product = %product.id,
            raw_materials = product.raw_materials.len(),
            "created product"
        );
        synthesis.products.insert(node.id.clone(), product);
    }

    synthesis
}
