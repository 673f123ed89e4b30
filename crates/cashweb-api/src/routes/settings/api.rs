//! Settings API endpoints - JSON API

use crate::AppState;
use axum::Json;

pub async fn api_settings(state: axum::extract::State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "settings": state.config,
    }))
}
