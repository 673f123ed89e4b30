//! Receipt endpoints - JSON API and HTMX endpoints
//!
//! Endpoints:
//! - api_members: Member list (JSON)
//! - api_receipt_store: Record a receipt (JSON)
//! - htmx_member_options: Member picker options (HTMX)
//! - htmx_receipt_store: Record a receipt from the form (HTMX)

use crate::{error_banner, parse_form, success_banner, ApiError, AppState};
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use cashweb_core::{PaymentChannel, ReceiptSubmission};
use cashweb_utils::escape_html;
use std::collections::HashMap;

/// Get the member list (JSON API)
pub async fn api_members(state: State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let members = state.cashbook.members().await?;
    let members: Vec<serde_json::Value> = members
        .iter()
        .map(|m| {
            serde_json::json!({
                "last_name": m.last_name,
                "first_name": m.first_name,
                "display_name": m.display_name(),
            })
        })
        .collect();
    Ok(Json(serde_json::json!({ "success": true, "members": members })))
}

/// Record a receipt (JSON API)
pub async fn api_receipt_store(state: State<AppState>, body: String) -> Result<Json<serde_json::Value>, ApiError> {
    let submission: ReceiptSubmission =
        serde_json::from_str(&body).map_err(|e| ApiError::BadRequest { message: e.to_string() })?;
    state.cashbook.add_receipt(&submission).await?;
    Ok(Json(serde_json::json!({ "success": true, "message": "Recette enregistrée avec succès !" })))
}

/// HTMX: Member picker options
pub async fn htmx_member_options(state: State<AppState>) -> Html<String> {
    match state.cashbook.members().await {
        Ok(members) => {
            let mut html = String::from("<option value=''>Sélectionnez un membre</option>");
            for member in &members {
                let name = escape_html(&member.display_name());
                html.push_str(&format!("<option value='{}'>{}</option>", name, name));
            }
            Html(html)
        }
        Err(_) => Html("<option value=''>Erreur de chargement des membres</option>".to_string()),
    }
}

/// HTMX: Store a receipt from the form
pub async fn htmx_receipt_store(state: State<AppState>, body: String) -> Response {
    let params = parse_form(&body);
    let submission = match receipt_from_form(&params) {
        Ok(submission) => submission,
        Err(message) => return Html(error_banner("Enregistrement impossible", &message)).into_response(),
    };

    match state.cashbook.add_receipt(&submission).await {
        Ok(()) => (
            [("HX-Trigger", "ledger-changed")],
            Html(format!(
                "{}<script>document.getElementById('receipt-form').reset();</script>",
                success_banner("Recette enregistrée avec succès !", &submission.member)
            )),
        )
            .into_response(),
        Err(e) => Html(error_banner("Enregistrement impossible", &e.to_string())).into_response(),
    }
}

fn receipt_from_form(params: &HashMap<String, String>) -> Result<ReceiptSubmission, String> {
    let field = |name: &str| params.get(name).cloned().unwrap_or_default();
    let channel: PaymentChannel = field("canal")
        .parse()
        .map_err(|_| "Canal de paiement invalide".to_string())?;

    Ok(ReceiptSubmission {
        date: field("date"),
        member: field("membre"),
        category: field("type"),
        channel,
        amount: field("montant"),
        description: field("description"),
    })
}

#[cfg(test)]
mod tests {
    use crate::tests::{app, get, post_form, post_json, sample_transport, MemoryTransport};
    use axum::http::StatusCode;
    use cashweb_remote::{Action, TransportError};

    #[tokio::test]
    async fn test_member_options() {
        let (router, _) = app(sample_transport());
        let (_, body) = get(router, "/receipts/members").await;
        assert!(body.starts_with("<option value=''>Sélectionnez un membre</option>"));
        assert!(body.contains("<option value='Diallo Awa'>Diallo Awa</option>"));
        assert!(!body.contains("Traoré"));
    }

    #[tokio::test]
    async fn test_member_options_on_failure() {
        let transport = MemoryTransport {
            failure: Some(TransportError::Network { message: "refused".to_string() }),
            ..Default::default()
        };
        let (router, _) = app(transport);
        let (_, body) = get(router, "/receipts/members").await;
        assert!(body.contains("Erreur de chargement des membres"));
    }

    #[tokio::test]
    async fn test_api_members() {
        let (router, _) = app(sample_transport());
        let (status, body) = get(router, "/api/members").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["members"].as_array().unwrap().len(), 1);
        assert_eq!(json["members"][0]["display_name"], "Diallo Awa");
    }

    #[tokio::test]
    async fn test_form_store_posts_wire_fields() {
        let (router, transport) = app(MemoryTransport::default());
        let (status, body) = post_form(
            router,
            "/receipts",
            "date=2024-02-01&membre=Diallo+Awa&type=Cotisation&canal=mobile_money_a&montant=5000&description=F%C3%A9vrier",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Recette enregistrée avec succès !"));
        assert!(body.contains("reset()"));

        let submitted = transport.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].0, Action::AddReceipt);
        assert_eq!(
            submitted[0].1,
            vec![
                ("date".to_string(), "2024-02-01".to_string()),
                ("membre".to_string(), "Diallo Awa".to_string()),
                ("type".to_string(), "Cotisation".to_string()),
                ("canal".to_string(), "Orange Money".to_string()),
                ("montant".to_string(), "5000".to_string()),
                ("description".to_string(), "Février".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_form_store_triggers_dashboard_refresh() {
        let (router, _) = app(MemoryTransport::default());
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/receipts")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(axum::body::Body::from("date=2024-02-01&membre=A+B&type=Don&canal=cash&montant=10"))
            .unwrap();
        let response = tower::ServiceExt::oneshot(router, request).await.unwrap();
        assert_eq!(
            response.headers().get("HX-Trigger").map(|v| v.to_str().unwrap()),
            Some("ledger-changed")
        );
    }

    #[tokio::test]
    async fn test_form_store_remote_error() {
        let transport = MemoryTransport {
            failure: Some(TransportError::Remote { message: "Montant invalide".to_string() }),
            ..Default::default()
        };
        let (router, _) = app(transport);
        let (_, body) = post_form(router, "/receipts", "date=2024-02-01&membre=A+B&type=Don&canal=cash&montant=x").await;
        assert!(body.contains("Erreur: Montant invalide"));
        assert!(!body.contains("reset()"));
    }

    #[tokio::test]
    async fn test_form_store_rejects_unknown_channel() {
        let (router, transport) = app(MemoryTransport::default());
        let (_, body) = post_form(router, "/receipts", "date=2024-02-01&membre=A+B&type=Don&canal=wave&montant=10").await;
        assert!(body.contains("Canal de paiement invalide"));
        assert!(transport.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_api_receipt_store() {
        let (router, transport) = app(MemoryTransport::default());
        let (status, body) = post_json(
            router,
            "/api/receipts",
            serde_json::json!({
                "date": "03/01/2024",
                "member": "Diallo Awa",
                "category": "Cotisation",
                "channel": "cash",
                "amount": "1000"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"success\":true"));
        assert_eq!(transport.submitted.lock().unwrap()[0].1[0].1, "2024-01-03");
    }

    #[tokio::test]
    async fn test_api_receipt_store_bad_payload() {
        let (router, _) = app(MemoryTransport::default());
        let (status, body) = post_json(router, "/api/receipts", serde_json::json!({"date": "2024-01-03"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_api_receipt_store_rejects_bank_card() {
        let (router, _) = app(MemoryTransport::default());
        let (status, _) = post_json(
            router,
            "/api/receipts",
            serde_json::json!({
                "date": "2024-01-03",
                "member": "Diallo Awa",
                "category": "Don",
                "channel": "bank_card",
                "amount": "1000"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
