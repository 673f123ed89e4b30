//! Expense endpoints - JSON API and HTMX endpoints

use crate::{error_banner, parse_form, success_banner, ApiError, AppState};
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use cashweb_core::{ExpenseSubmission, PaymentChannel};
use std::collections::HashMap;

/// Record an expense (JSON API)
pub async fn api_expense_store(state: State<AppState>, body: String) -> Result<Json<serde_json::Value>, ApiError> {
    let submission: ExpenseSubmission =
        serde_json::from_str(&body).map_err(|e| ApiError::BadRequest { message: e.to_string() })?;
    state.cashbook.add_expense(&submission).await?;
    Ok(Json(serde_json::json!({ "success": true, "message": "Dépense enregistrée avec succès !" })))
}

/// HTMX: Store an expense from the form
pub async fn htmx_expense_store(state: State<AppState>, body: String) -> Response {
    let params = parse_form(&body);
    let submission = match expense_from_form(&params) {
        Ok(submission) => submission,
        Err(message) => return Html(error_banner("Enregistrement impossible", &message)).into_response(),
    };

    match state.cashbook.add_expense(&submission).await {
        Ok(()) => (
            [("HX-Trigger", "ledger-changed")],
            Html(format!(
                "{}<script>document.getElementById('expense-form').reset();</script>",
                success_banner("Dépense enregistrée avec succès !", &submission.category)
            )),
        )
            .into_response(),
        Err(e) => Html(error_banner("Enregistrement impossible", &e.to_string())).into_response(),
    }
}

fn expense_from_form(params: &HashMap<String, String>) -> Result<ExpenseSubmission, String> {
    let field = |name: &str| params.get(name).cloned().unwrap_or_default();
    let channel: PaymentChannel = field("canal")
        .parse()
        .map_err(|_| "Canal de paiement invalide".to_string())?;

    Ok(ExpenseSubmission {
        date: field("date"),
        category: field("categorie"),
        description: field("description"),
        justification: field("justificatif"),
        amount: field("montant"),
        channel,
    })
}
