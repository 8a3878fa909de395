use axum::Json;

pub async fn status() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}
