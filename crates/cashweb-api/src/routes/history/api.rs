//! History endpoints - JSON API and HTMX partials
//!
//! Endpoints:
//! - api_history: Filtered history as JSON
//! - htmx_history_list: History table (HTMX)

use crate::{message_slot, refresh_error, ApiError, AppState};
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use cashweb_core::time::format_display_date;
use cashweb_core::{HistoryFilter, HistoryView, PaymentChannel, TransactionKind, UnifiedTransaction};
use cashweb_utils::escape_html;
use std::collections::HashMap;

/// Build a filter from query parameters; empty values mean "all"
pub fn parse_filter(params: &HashMap<String, String>) -> Result<HistoryFilter, String> {
    let kind = match params.get("kind").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(kind) => Some(kind.parse::<TransactionKind>()?),
        None => None,
    };
    let channel = match params.get("channel").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(channel) => Some(channel.parse::<PaymentChannel>()?),
        None => None,
    };
    Ok(HistoryFilter { kind, channel })
}

/// Get the filtered history (JSON API)
pub async fn api_history(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filter = parse_filter(&params).map_err(|message| ApiError::BadRequest { message })?;
    let view = state.cashbook.history(&filter).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "count": view.entries().len(),
        "history": view,
    })))
}

/// Message element of the history page
pub const HISTORY_MESSAGES: &str = "history-messages";

/// HTMX: History table - Partial page update
///
/// On failure the table already on screen stays in place.
pub async fn htmx_history_list(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Response {
    let filter = match parse_filter(&params) {
        Ok(filter) => filter,
        Err(message) => return refresh_error(HISTORY_MESSAGES, "Filtre invalide", &message),
    };

    match state.cashbook.history(&filter).await {
        Ok(view) => Html(format!(
            "{}{}",
            render_history_table(&state, &view),
            message_slot(HISTORY_MESSAGES, "")
        ))
        .into_response(),
        Err(e) => refresh_error(HISTORY_MESSAGES, "Impossible de charger l'historique", &e.to_string()),
    }
}

fn render_history_table(state: &AppState, view: &HistoryView) -> String {
    if view.is_empty() {
        return "<div class='text-center py-12 text-gray-500'>Aucune transaction trouvée avec les filtres actuels.</div>".to_string();
    }

    let rows: String = view.entries().iter().map(|t| render_history_row(state, t)).collect();
    format!(
        r#"<table class='w-full text-sm'>
            <thead><tr class='text-left text-gray-500 border-b'>
                <th class='py-2'>Date</th><th>Type</th><th>Description</th><th class='text-right'>Montant</th><th>Canal</th>
            </tr></thead>
            <tbody>{}</tbody>
        </table>
        <p class='text-xs text-gray-400 mt-4'>{} transaction(s)</p>"#,
        rows,
        view.entries().len()
    )
}

fn render_history_row(state: &AppState, transaction: &UnifiedTransaction) -> String {
    let date = transaction
        .date
        .map(format_display_date)
        .unwrap_or_else(|| transaction.date_raw.clone());
    let amount = transaction
        .amount
        .map(|amount| state.money(amount))
        .unwrap_or_else(|| transaction.amount_raw.clone());
    let (badge, amount_color) = match transaction.kind {
        TransactionKind::Receipt => ("bg-green-100 text-green-700", "text-green-600"),
        TransactionKind::Expense => ("bg-red-100 text-red-700", "text-red-600"),
    };

    format!(
        "<tr class='border-b hover:bg-gray-50'><td class='py-2'>{}</td><td><span class='px-2 py-0.5 rounded text-xs {}'>{}</span></td><td>{}</td><td class='text-right font-medium {}'>{}</td><td>{}</td></tr>",
        escape_html(&date),
        badge,
        transaction.kind.label(),
        escape_html(&transaction.description),
        amount_color,
        escape_html(&amount),
        escape_html(&transaction.channel_label),
    )
}
