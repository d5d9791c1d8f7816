//! API Tests: the HTTP surface driven through the router without a socket
//!
//! These tests verify:
//! 1. Envelope shape on success and failure
//! 2. Upload validation (missing file, missing wallet, non-image)
//! 3. Mint path status codes (400 / 404 / 403) and receipts
//! 4. Collection stats and listing endpoints over seeded fixtures

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use http_body_util::BodyExt;
use ordinal_minter::{create_router, create_router_with_name, Minter, MinterConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const WALLET: &str = "1AliceWa11etxxxxxxxxxxxxxxxxxxxxx";

fn app() -> Router {
    create_router(Arc::new(Minter::from_config(MinterConfig::default())))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.expect("response");
    let status = res.status();
    let bytes = res.into_body().collect().await.expect("body").to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn upload(app: &Router, wallet: &str) -> Value {
    let (status, body) = post(app, "/api/ordinals/validate", json!({
        "wallet": wallet,
        "content": BASE64.encode([0x89, b'P', b'N', b'G', 1, 2, 3]),
        "contentType": "image/png",
        "fileName": "fox.png",
    })).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["valid"], true);
    body["data"]["ordinal"].clone()
}

#[tokio::test]
async fn health_reports_service_name() {
    let app = create_router_with_name(Arc::new(Minter::from_config(MinterConfig::default())), "minter-test");
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "minter-test");
}

#[tokio::test]
async fn validate_rejects_bad_uploads() {
    let app = app();

    let (status, body) = post(&app, "/api/ordinals/validate", json!({"wallet": WALLET})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "No file uploaded"}));

    let (status, body) = post(&app, "/api/ordinals/validate", json!({"content": "AQID", "contentType": "image/png"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Wallet address is required");

    let (status, body) = post(&app, "/api/ordinals/validate", json!({
        "wallet": WALLET, "content": "AQID", "contentType": "application/pdf",
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please upload an image file (JPG, PNG, GIF, SVG).");

    // the size check owns the 10 MB boundary, not the body-length limit
    let sized = |len: usize| json!({
        "wallet": WALLET,
        "content": format!("data:image/png;base64,{}", BASE64.encode(vec![0u8; len])),
    });
    let (status, body) = post(&app, "/api/ordinals/validate", sized(10 * 1024 * 1024)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["valid"], true);

    let (status, body) = post(&app, "/api/ordinals/validate", sized(10 * 1024 * 1024 + 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "File exceeds the 10 MB upload limit"}));
}

#[tokio::test]
async fn validate_with_unknown_collection_is_invalid_not_an_error() {
    let app = app();
    let (status, body) = post(&app, "/api/ordinals/validate", json!({
        "wallet": WALLET, "content": "data:image/gif;base64,R0lGODlh", "collectionId": "no-such-slug",
    })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["valid"], false);
    assert_eq!(body["data"]["message"], "Collection no-such-slug not found");
}

#[tokio::test]
async fn upload_then_mint_returns_receipt() {
    let app = app();
    let ordinal = upload(&app, WALLET).await;
    let inscription = ordinal["inscriptionId"].as_str().expect("inscription id").to_string();
    assert!(inscription.starts_with("inscription-"));
    assert_eq!(ordinal["owner"], WALLET);

    let (status, fetched) = get(&app, &format!("/api/ordinals/{}", ordinal["id"])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["inscriptionId"], inscription.as_str());

    let (status, preview) = get(&app, &format!("/api/ordinals/generate3d/{}?quality=high", inscription)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["data"]["inscriptionId"], format!("3d-{}", inscription));
    assert_eq!(preview["data"]["polygonCount"], 10_000);

    let (status, body) = post(&app, "/api/ordinals/mint3d", json!({
        "ordinalId": inscription, "quality": "high", "wallet": WALLET,
    })).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let receipt = &body["data"];
    assert!(!receipt["txId"].as_str().unwrap().is_empty());
    assert!(!receipt["newOrdinalId"].as_str().unwrap().is_empty());
    assert_eq!(receipt["status"], "confirmed");
    assert_eq!(receipt["fee"], 10_000 + 2_100 + 5_000);
    // generate3d above already created the model, mint reuses it
    assert_eq!(receipt["threeDOrdinalId"], preview["data"]["id"]);

    let (status, tx) = get(&app, &format!("/api/ordinals/mint3d/transactions/{}", receipt["threeDOrdinalId"])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tx["data"]["transactionId"], receipt["txId"]);

    let (_, mine) = get(&app, &format!("/api/ordinals/user/{}", WALLET)).await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);

    let (_, recent) = get(&app, "/api/ordinals/recent").await;
    assert_eq!(recent["data"][0]["id"], receipt["threeDOrdinalId"]);
}

#[tokio::test]
async fn mint_status_codes() {
    let app = app();

    let (status, _) = post(&app, "/api/ordinals/mint3d", json!({"wallet": WALLET})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(&app, "/api/ordinals/mint3d", json!({
        "ordinalId": "inscription-missing", "quality": "standard", "wallet": WALLET,
    })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ordinal not found");

    let ordinal = upload(&app, WALLET).await;
    let (status, body) = post(&app, "/api/ordinals/mint3d", json!({
        "ordinalId": ordinal["inscriptionId"], "quality": "ultra", "wallet": "1Mallory",
    })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"success": false, "error": "You do not own this ordinal"}));
}

#[tokio::test]
async fn lookups_that_miss_are_404() {
    let app = app();
    let (status, body) = get(&app, "/api/ordinals/inscription-nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ordinal not found");

    let (status, _) = get(&app, "/api/ordinals/generate3d/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/api/ordinals/mint3d/transactions/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Transaction not found");

    let (status, _) = get(&app, "/api/collections/42/stats").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_needs_three_characters() {
    let app = app();
    let (status, body) = get(&app, "/api/ordinals/search?q=fo").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query must be at least 3 characters");

    let (status, _) = get(&app, "/api/ordinals/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/api/ordinals/search?q=fox").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn seeded_collection_stats_stay_within_supply() {
    let app = app();
    let (status, body) = get(&app, "/api/collections").await;
    assert_eq!(status, StatusCode::OK);
    let collections = body["data"].as_array().unwrap();
    assert!(!collections.is_empty());

    for c in collections {
        let (status, stats) = get(&app, &format!("/api/collections/{}/stats", c["id"])).await;
        assert_eq!(status, StatusCode::OK);
        let stats = &stats["data"];
        let minted = stats["minted"].as_u64().unwrap();
        let max = stats["maxSupply"].as_u64().unwrap();
        assert!(minted <= max);
        assert_eq!(stats["remaining"].as_u64().unwrap(), max - minted);
    }

    let (_, by_slug) = get(&app, "/api/collections/bsv-20-foxes/stats").await;
    assert_eq!(by_slug["data"]["name"], "Pixel Foxes");
}

#[tokio::test]
async fn minting_bumps_three_d_count() {
    let app = app();
    let (_, before) = get(&app, "/api/collections/bsv-20-foxes/stats").await;
    let ordinal = upload(&app, WALLET).await;
    let (status, _) = post(&app, "/api/ordinals/mint3d", json!({
        "ordinalId": ordinal["id"].to_string(), "quality": "standard", "wallet": WALLET,
    })).await;
    assert_eq!(status, StatusCode::OK);
    let (_, after) = get(&app, "/api/collections/bsv-20-foxes/stats").await;
    assert_eq!(
        after["data"]["threeDMinted"].as_u64().unwrap(),
        before["data"]["threeDMinted"].as_u64().unwrap() + 1
    );
}

#[tokio::test]
async fn examples_are_seeded() {
    let (status, body) = get(&app(), "/api/ordinals/examples").await;
    assert_eq!(status, StatusCode::OK);
    let examples = body["data"].as_array().unwrap();
    assert_eq!(examples.len(), 4);
    assert!(examples.iter().all(|e| e["format"] == "glTF"));
}
