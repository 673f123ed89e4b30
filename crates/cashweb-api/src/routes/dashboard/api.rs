//! Dashboard endpoints - JSON API and HTMX partials
//!
//! Endpoints:
//! - api_balances: Balances as JSON
//! - htmx_balances: Balance cards (HTMX)

use crate::{message_slot, refresh_error, ApiError, AppState};
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use cashweb_core::BalanceReport;
use cashweb_utils::escape_html;

/// Get channel balances (JSON API)
pub async fn api_balances(state: State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let report = state.cashbook.balances().await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "balances": report.balances,
        "formatted": {
            "cash": state.money(report.balances.cash),
            "bank": state.money(report.balances.bank),
            "mobile_a": state.money(report.balances.mobile_a),
            "mobile_b": state.money(report.balances.mobile_b),
            "total": state.money(report.balances.total),
        },
        "skipped_rows": report.warnings.len(),
        "warnings": report.warnings,
    })))
}

/// Message element of the dashboard page
pub const BALANCES_MESSAGES: &str = "balances-messages";

/// HTMX: Balance cards - Partial page update
///
/// On failure the cards already on screen stay in place.
pub async fn htmx_balances(state: State<AppState>) -> Response {
    match state.cashbook.balances().await {
        Ok(report) => Html(format!(
            "{}{}",
            render_balance_cards(&state, &report),
            message_slot(BALANCES_MESSAGES, "")
        ))
        .into_response(),
        Err(e) => refresh_error(BALANCES_MESSAGES, "Impossible de charger les soldes", &e.to_string()),
    }
}

fn render_balance_cards(state: &AppState, report: &BalanceReport) -> String {
    let balances = &report.balances;
    let cards = [
        ("Espèces", balances.cash, "green"),
        ("Bancaire", balances.bank, "blue"),
        ("Orange Money", balances.mobile_a, "orange"),
        ("MTN Mobile Money", balances.mobile_b, "yellow"),
    ];

    let mut html = String::from("<div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-5 gap-4'>");
    for (label, amount, color) in cards {
        html.push_str(&format!(
            "<div class='bg-{color}-50 p-4 rounded-lg border border-{color}-200'><p class='text-sm text-{color}-600'>{}</p><p class='text-2xl font-bold text-{color}-700'>{}</p></div>",
            label,
            escape_html(&state.money(amount)),
            color = color
        ));
    }
    html.push_str(&format!(
        "<div class='bg-indigo-50 p-4 rounded-lg border border-indigo-200'><p class='text-sm text-indigo-600'>Total</p><p class='text-2xl font-bold {}'>{}</p></div>",
        if balances.total.is_sign_negative() && !balances.total.is_zero() { "text-red-600" } else { "text-indigo-700" },
        escape_html(&state.money(balances.total))
    ));
    html.push_str("</div>");

    if !report.warnings.is_empty() {
        html.push_str(&format!(
            "<p class='text-sm text-yellow-700 mt-4'>{} ligne(s) ignorée(s) : montant illisible ou hors limites.</p>",
            report.warnings.len()
        ));
    }
    html
}
