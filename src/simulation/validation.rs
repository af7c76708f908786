// src/simulation/validation.rs

//! Pre-flight checks on a submitted network.
//!
//! The topology analysis is total over any graph, so nothing here is needed to
//! build a model. These checks catch references and values the engine would
//! otherwise trip over halfway through construction.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::model::entities::{PRODUCT_PREFIX, RAW_MATERIAL_PREFIX};
use crate::model::graph::{NodeKind, SimulationRequest};
use crate::simulation::topology::{analyze, index_nodes};
use crate::strategy::policy::PolicyKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    /// What the issue is about, e.g. `link e1` or `node F1`.
    pub subject: String,
    pub message: String,
}

impl Issue {
    fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            subject: subject.into(),
            message: message.into(),
        }
    }

    fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<Issue>) -> Self {
        let valid = !issues.iter().any(|i| i.severity == Severity::Error);
        Self { valid, issues }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }
}

pub fn validate(request: &SimulationRequest) -> ValidationReport {
    let mut issues = Vec::new();
    let index = index_nodes(&request.nodes);

    if request.sim_time == 0 {
        issues.push(Issue::error("sim_time", "simulation horizon must be positive"));
    }

    let mut seen = HashSet::new();
    for node in &request.nodes {
        let subject = format!("node {}", node.id);
        if !seen.insert(node.id.as_str()) {
            issues.push(Issue::error(&subject, "duplicate node id"));
        }
        if node.id.starts_with(RAW_MATERIAL_PREFIX) || node.id.starts_with(PRODUCT_PREFIX) {
            issues.push(Issue::warning(
                &subject,
                "id uses a reserved prefix and may collide with derived entity ids",
            ));
        }
        let prices = [
            ("holding cost", node.data.holding_cost),
            ("manufacturing cost", node.data.manufacturing_cost),
            ("buy price", node.data.buy_price),
            ("sell price", node.data.sell_price),
        ];
        for (name, value) in prices {
            if !(value >= 0.0) {
                issues.push(Issue::error(&subject, format!("{name} must be a non-negative number")));
            }
        }
        if node.kind() != NodeKind::Supplier {
            if let Err(err) = node.data.replenishment_policy.parse::<PolicyKind>() {
                issues.push(Issue::error(&subject, err.to_string()));
            }
        }
    }

    for link in &request.links {
        let subject = format!("link {}", link.id);
        for (end, id) in [("source", &link.source), ("target", &link.target)] {
            if !index.contains_key(id.as_str()) {
                issues.push(Issue::error(&subject, format!("{end} references unknown node '{id}'")));
            }
        }
        if !(link.data.cost >= 0.0) {
            issues.push(Issue::error(&subject, "cost must be a non-negative number"));
        }
        if !(link.data.lead_time >= 0.0) {
            issues.push(Issue::error(&subject, "lead time must be a non-negative number"));
        }
    }

    for demand in &request.demands {
        let subject = format!("demand {}", demand.id);
        if !index.contains_key(demand.target_node.as_str()) {
            issues.push(Issue::error(
                &subject,
                format!("targets unknown node '{}'", demand.target_node),
            ));
        }
        if !(demand.arrival_interval > 0.0) || !demand.arrival_interval.is_finite() {
            issues.push(Issue::error(&subject, "arrival interval must be positive"));
        }
        if demand.order_quantity == 0 {
            issues.push(Issue::error(&subject, "order quantity must be positive"));
        }
        if !(demand.delivery_cost >= 0.0) || !(demand.lead_time >= 0.0) {
            issues.push(Issue::error(&subject, "delivery cost and lead time must be non-negative"));
        }
    }

    let topology = analyze(&request.nodes, &request.links);
    for node in &request.nodes {
        match node.kind() {
            NodeKind::Factory if topology.feeders_of(&node.id).is_empty() => {
                issues.push(Issue::warning(
                    format!("node {}", node.id),
                    "no supplier feeds this factory, a default raw material will be used",
                ));
            }
            NodeKind::Supplier if !topology.is_finite(&node.id) => {
                let ships_elsewhere = request.links.iter().any(|l| l.source == node.id);
                if ships_elsewhere {
                    issues.push(Issue::warning(
                        format!("node {}", node.id),
                        "supplier feeds no factory and is treated as infinite",
                    ));
                }
            }
            _ => {}
        }
    }

    ValidationReport::from_issues(issues)
}
