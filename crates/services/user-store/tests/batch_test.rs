//! End-to-end batch runs against a fresh in-memory store.

use serde_json::{json, Value};

use domain::IdStrategy;
use user_store_lib::config::UserStoreConfig;
use user_store_lib::run_batch;

fn sequential_config() -> UserStoreConfig {
    UserStoreConfig::default().with_id_strategy(Some(IdStrategy::Sequential))
}

async fn run(script: Value) -> Vec<Value> {
    let outcomes = run_batch(&sequential_config(), &script.to_string())
        .await
        .unwrap();
    outcomes
        .iter()
        .map(|o| serde_json::to_value(o).unwrap())
        .collect()
}

#[tokio::test]
async fn test_batch_full_lifecycle() {
    let lines = run(json!([
        {"op": "create", "name": "jest", "age": 20, "city": "Diamantina"},
        {"op": "create", "name": "jest2", "age": 21, "city": "Ouro Preto"},
        {"op": "update", "id": "1", "name": "Natan"},
        {"op": "remove", "id": "2"},
        {"op": "list"},
        {"op": "list_deleted"},
        {"op": "count"}
    ]))
    .await;

    assert_eq!(lines[0]["ok"]["id"], "1");
    assert_eq!(lines[1]["ok"]["id"], "2");
    assert_eq!(lines[2]["ok"]["name"], "Natan");
    assert_eq!(lines[2]["ok"]["city"], "Diamantina");
    assert_eq!(lines[3]["ok"], true);

    let listed = lines[4]["ok"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "Natan");

    let deleted = lines[5]["ok"].as_array().unwrap();
    assert_eq!(deleted[0]["id"], "2");
    assert!(deleted[0].get("deletedAt").is_some());

    assert_eq!(lines[6]["ok"], 1);
}

#[tokio::test]
async fn test_batch_reports_each_error_kind() {
    let lines = run(json!([
        {"op": "create", "name": "jest", "age": 20, "city": ""},
        {"op": "create", "name": "jest", "age": 20, "city": "Diamantina"},
        {"op": "create", "name": "jest", "age": 30, "city": "Salvador"},
        {"op": "find", "id": "missing-id"},
        {"op": "remove", "id": "1"},
        {"op": "remove", "id": "1"}
    ]))
    .await;

    assert_eq!(lines[0]["error"]["code"], "MISSING_PARAMS");
    assert_eq!(lines[1]["ok"]["name"], "jest");
    assert_eq!(lines[2]["error"]["code"], "DUPLICATE_NAME");
    assert_eq!(lines[3]["error"]["code"], "NOT_FOUND");
    assert_eq!(lines[4]["ok"], true);
    assert_eq!(lines[5]["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_batch_null_create_fields_are_missing_params() {
    let lines = run(json!([
        {"op": "create", "name": "ok", "age": 20, "city": "Diamantina"},
        {"op": "create", "name": "jest", "age": null, "city": "Diamantina"},
        {"op": "create", "name": null, "age": 20, "city": "Diamantina"},
        {"op": "count"}
    ]))
    .await;

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["ok"]["name"], "ok");
    assert_eq!(lines[1]["error"]["code"], "MISSING_PARAMS");
    assert_eq!(lines[1]["error"]["message"], "Missing params: age");
    assert_eq!(lines[2]["error"]["code"], "MISSING_PARAMS");
    assert_eq!(lines[2]["error"]["message"], "Missing params: name");
    assert_eq!(lines[3]["ok"], 1);
}

#[tokio::test]
async fn test_batch_rejects_malformed_script() {
    let result = run_batch(&sequential_config(), "{\"op\": \"list\"}").await;
    let err = result.err().unwrap();
    assert_eq!(err.code(), "INVALID_INPUT");
}
