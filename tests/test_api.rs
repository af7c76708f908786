//! End-to-end tests of the HTTP surface against a scripted engine.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use supplynet_sim::api::router;
use supplynet_sim::error::EngineError;
use supplynet_sim::simulation::builder::EngineNode;
use supplynet_sim::{SimulationEngine, SimulationModel};

/// Answers every run with a fixed result and keeps the last model it built.
#[derive(Clone)]
struct ScriptedEngine {
    result: Result<Value, String>,
    last_model: Arc<Mutex<Option<SimulationModel>>>,
}

impl ScriptedEngine {
    fn returning(result: Value) -> Self {
        Self {
            result: Ok(result),
            last_model: Arc::new(Mutex::new(None)),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            last_model: Arc::new(Mutex::new(None)),
        }
    }

    fn last_model(&self) -> Option<SimulationModel> {
        self.last_model.lock().unwrap().clone()
    }
}

impl SimulationEngine for ScriptedEngine {
    type Network = SimulationModel;

    fn version(&self) -> &str {
        "9.9.9"
    }

    fn create_network(&self, model: SimulationModel) -> Result<SimulationModel, EngineError> {
        *self.last_model.lock().unwrap() = Some(model.clone());
        Ok(model)
    }

    fn simulate(
        &self,
        _network: SimulationModel,
        _sim_time: u32,
        _logging: bool,
    ) -> Result<Value, EngineError> {
        self.result.clone().map_err(EngineError::failed)
    }
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// S1 (feeds no factory), F1 (SS 400/1000), R1 (RQ 7/500); one demand on R1.
fn three_node_request() -> Value {
    json!({
        "nodes": [
            { "id": "S1", "data": { "label": "Supplier", "nodeType": "supplier" } },
            { "id": "F1", "data": {
                "label": "Factory", "nodeType": "factory",
                "replenishment_policy": "SS", "policy_s": 400, "policy_S": 1000
            } },
            { "id": "R1", "data": {
                "label": "Retailer", "nodeType": "retailer",
                "replenishment_policy": "RQ", "policy_R": 7, "policy_Q": 500
            } }
        ],
        "links": [
            { "id": "e1", "source": "S1", "target": "R1", "data": { "cost": 5, "lead_time": 2 } },
            { "id": "e2", "source": "F1", "target": "R1", "data": { "cost": 3, "lead_time": 1 } }
        ],
        "demands": [
            { "id": "d1", "name": "Customers", "target_node": "R1",
              "arrival_interval": 5, "order_quantity": 20 }
        ],
        "sim_time": 10
    })
}

fn engine_result() -> Value {
    json!({
        "profit": 1520.5,
        "revenue": 6000,
        "num_of_nodes": 3,
        "num_of_links": 2,
        "nodes": {
            "S1": { "node_type": "infinite_supplier",
                    "inventory": { "instantaneous_levels": [[0, 1e9]] } },
            "F1": { "node_type": "factory",
                    "inventory": { "instantaneous_levels": [[0, 10000], [5, 9600]] } },
            "R1": { "node_type": "retailer",
                    "inventory": { "instantaneous_levels": [[0, 10000], [5, 9980], [10, 9960]] } }
        }
    })
}

#[tokio::test]
async fn test_root_lists_supported_node_kinds() {
    let app = router(ScriptedEngine::returning(json!({})), false);
    let (status, body) = send(app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["version"], "2.0.0");
    assert_eq!(
        body["nodes_supported"],
        json!(["supplier", "factory", "distributor", "retailer"])
    );
}

#[tokio::test]
async fn test_health_reports_engine_version() {
    let app = router(ScriptedEngine::returning(json!({})), false);
    let (status, body) = send(app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "engine": "9.9.9" }));
}

#[tokio::test]
async fn test_three_node_scenario() {
    let engine = ScriptedEngine::returning(engine_result());
    let app = router(engine.clone(), false);
    let (status, body) = send(app, "POST", "/simulate", Some(three_node_request())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["metrics"]["num_of_nodes"], 3);
    assert_eq!(body["metrics"]["profit"], 1520.5);
    assert_eq!(body["metrics"]["shortage"], json!([0.0, 0.0]));

    let inventory = body["inventory_data"].as_object().unwrap();
    assert!(inventory.contains_key("F1"));
    assert!(inventory.contains_key("R1"));
    assert!(!inventory.contains_key("S1"));
    assert_eq!(inventory["R1"]["time"], json!([0.0, 5.0, 10.0]));
    assert_eq!(inventory["R1"]["level"], json!([10000.0, 9980.0, 9960.0]));

    let model = engine.last_model().unwrap();
    assert_eq!(model.nodes.len(), 3);
    assert_eq!(model.links.len(), 2);
    assert_eq!(model.demands.len(), 1);
    assert!(matches!(model.node("S1"), Some(EngineNode::InfiniteSupplier { .. })));
    let product = model.node("F1").and_then(EngineNode::product).unwrap();
    assert_eq!(product.raw_materials.len(), 1);
    assert_eq!(product.raw_materials[0].raw_material.id, "rm_F1");
}

#[tokio::test]
async fn test_engine_failure_is_a_500_with_detail() {
    let app = router(ScriptedEngine::failing("network has no path to R1"), false);
    let (status, body) = send(app, "POST", "/simulate", Some(three_node_request())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Simulation failed: "));
    assert!(detail.contains("network has no path to R1"));
}

#[tokio::test]
async fn test_non_numeric_metric_fails_the_request() {
    let app = router(ScriptedEngine::returning(json!({ "profit": "n/a" })), false);
    let (status, body) = send(app, "POST", "/simulate", Some(three_node_request())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().starts_with("Simulation failed: "));
}

#[tokio::test]
async fn test_dangling_demand_is_rejected_before_the_engine() {
    let engine = ScriptedEngine::returning(engine_result());
    let app = router(engine.clone(), false);
    let mut request = three_node_request();
    request["demands"][0]["target_node"] = json!("R9");

    let (status, body) = send(app, "POST", "/simulate", Some(request)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        "Simulation failed: invalid network: demand d1: targets unknown node 'R9'"
    );
    assert!(engine.last_model().is_none());
}

#[tokio::test]
async fn test_unknown_policy_is_rejected() {
    let app = router(ScriptedEngine::returning(engine_result()), false);
    let mut request = three_node_request();
    request["nodes"][2]["data"]["replenishment_policy"] = json!("sS");

    let (status, body) = send(app, "POST", "/simulate", Some(request)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("'sS'"));
}

#[tokio::test]
async fn test_malformed_body_is_a_client_error() {
    let app = router(ScriptedEngine::returning(json!({})), false);
    let (status, _) = send(app, "POST", "/simulate", Some(json!({ "links": [] }))).await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_validate_reports_issues_without_running() {
    let engine = ScriptedEngine::returning(engine_result());
    let app = router(engine.clone(), false);
    let (status, body) = send(app, "POST", "/validate", Some(three_node_request())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    let subjects: Vec<&str> = body["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["subject"].as_str().unwrap())
        .collect();
    assert_eq!(subjects, vec!["node S1", "node F1"]);
    assert!(body["issues"]
        .as_array()
        .unwrap()
        .iter()
        .all(|i| i["severity"] == "warning"));
    assert!(engine.last_model().is_none());
}
