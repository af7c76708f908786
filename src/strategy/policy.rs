// src/strategy/policy.rs

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, ParsePolicyError};
use crate::model::graph::NodeData;

/// Which replenishment rule a stocking node follows, as named in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// Reorder point / order-up-to level.
    Ss,
    /// Periodic review with a fixed order quantity.
    Rq,
}

impl FromStr for PolicyKind {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SS" => Ok(PolicyKind::Ss),
            "RQ" => Ok(PolicyKind::Rq),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Ss => write!(f, "SS"),
            PolicyKind::Rq => write!(f, "RQ"),
        }
    }
}

/// A replenishment policy with its parameters.
///
/// Serialized the way the engine expects it:
/// `{"replenishment_policy": "SS", "policy_param": {"s": .., "S": ..}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "replenishment_policy", content = "policy_param")]
pub enum ReplenishmentPolicy {
    #[serde(rename = "SS")]
    Ss {
        s: u64,
        #[serde(rename = "S")]
        big_s: u64,
    },
    #[serde(rename = "RQ")]
    Rq {
        #[serde(rename = "R")]
        r: u64,
        #[serde(rename = "Q")]
        q: u64,
    },
}

impl ReplenishmentPolicy {
    /// Parses the node's policy name and picks the matching parameter pair.
    ///
    /// Unknown policy names are rejected rather than mapped to a default.
    pub fn from_node(node_id: &str, data: &NodeData) -> Result<Self, ModelError> {
        let kind = data
            .replenishment_policy
            .parse::<PolicyKind>()
            .map_err(|_| ModelError::UnknownPolicy {
                node_id: node_id.to_string(),
                policy: data.replenishment_policy.clone(),
            })?;

        Ok(match kind {
            PolicyKind::Ss => ReplenishmentPolicy::Ss {
                s: data.policy_s,
                big_s: data.policy_big_s,
            },
            PolicyKind::Rq => ReplenishmentPolicy::Rq {
                r: data.policy_r,
                q: data.policy_q,
            },
        })
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            ReplenishmentPolicy::Ss { .. } => PolicyKind::Ss,
            ReplenishmentPolicy::Rq { .. } => PolicyKind::Rq,
        }
    }
}
