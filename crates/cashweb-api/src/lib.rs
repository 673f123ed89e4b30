//! HTTP dashboard and JSON API with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Channel balance cards
//! - routes::receipts: Receipt form and member picker
//! - routes::expenses: Expense form
//! - routes::history: Filtered transaction history
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use axum::{
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use cashweb_config::Config;
use cashweb_core::{Cashbook, Decimal};
use cashweb_utils::escape_html;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub cashbook: Arc<Cashbook>,
    pub config: Config,
}

impl AppState {
    /// Format an amount with the configured currency
    pub fn money(&self, amount: Decimal) -> String {
        cashweb_core::format_currency(amount, &self.config.currency)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{api_balances, htmx_balances, page_dashboard};
    use routes::expenses::{api_expense_store, htmx_expense_store, page_expenses};
    use routes::history::{api_history, htmx_history_list, page_history};
    use routes::receipts::{api_members, api_receipt_store, htmx_member_options, htmx_receipt_store, page_receipts};
    use routes::settings::{api_settings, page_settings};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/balances", get(api_balances))
        .route("/api/history", get(api_history))
        .route("/api/members", get(api_members))
        .route("/api/receipts", post(api_receipt_store))
        .route("/api/expenses", post(api_expense_store))
        .route("/api/settings", get(api_settings))
        // HTMX page routes
        .route("/", get(page_dashboard))
        .route("/dashboard", get(page_dashboard))
        .route("/receipts", get(page_receipts).post(htmx_receipt_store))
        .route("/expenses", get(page_expenses).post(htmx_expense_store))
        .route("/history", get(page_history))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/dashboard/balances", get(htmx_balances))
        .route("/receipts/members", get(htmx_member_options))
        .route("/history/list", get(htmx_history_list))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Caisse</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/", "Tableau de bord", "📊"),
        ("/receipts", "Recettes", "💰"),
        ("/expenses", "Dépenses", "🧾"),
        ("/history", "Historique", "📋"),
        ("/settings", "Paramètres", "⚙️"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Caisse</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let is_active = if *path == "/" {
            current_path == "/" || current_path == "/dashboard"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#, inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Red banner for content that failed to load or save
pub fn error_banner(title: &str, message: &str) -> String {
    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-lg p-4'><div class='flex items-center gap-2'><span class='text-red-600'>✗</span><span class='font-medium text-red-800'>{}</span></div><p class='text-sm text-red-600 mt-1'>Erreur: {}</p></div>"#,
        escape_html(title),
        escape_html(message)
    )
}

/// Out-of-band replacement for a page's message element
pub fn message_slot(message_id: &str, content: &str) -> String {
    format!("<div id='{}' hx-swap-oob='true'>{}</div>", message_id, content)
}

/// Failed partial refresh: the swap target keeps what it shows and the
/// banner lands in the page's message element
pub fn refresh_error(message_id: &str, title: &str, message: &str) -> Response {
    (
        [("HX-Reswap", "none")],
        Html(message_slot(message_id, &error_banner(title, message))),
    )
        .into_response()
}

/// Green confirmation banner
pub fn success_banner(title: &str, message: &str) -> String {
    format!(
        r#"<div class='bg-green-50 border border-green-200 rounded-lg p-4'><div class='flex items-center gap-2'><span class='text-green-600'>✓</span><span class='font-medium text-green-800'>{}</span></div><p class='text-sm text-green-600 mt-1'>{}</p></div>"#,
        escape_html(title),
        escape_html(message)
    )
}

/// `<option>` list of every payment channel accepted by a form
pub fn channel_options(channels: impl IntoIterator<Item = cashweb_core::PaymentChannel>, selected: Option<cashweb_core::PaymentChannel>) -> String {
    channels
        .into_iter()
        .map(|channel| {
            format!(
                "<option value='{}'{}>{}</option>",
                channel.code(),
                if Some(channel) == selected { " selected" } else { "" },
                escape_html(channel.label())
            )
        })
        .collect()
}

/// Decode an `application/x-www-form-urlencoded` body
pub fn parse_form(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urlencoding::decode(&key.replace('+', " ")).map(|s| s.into_owned()).unwrap_or_default();
        let value = urlencoding::decode(&value.replace('+', " ")).map(|s| s.into_owned()).unwrap_or_default();
        params.insert(key, value);
    }
    params
}

/// Start the HTTP server
///
/// Binds the configured address and serves until Ctrl-C.
pub async fn start_server(config: Config, cashbook: Arc<Cashbook>) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState { cashbook, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting cashweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Tableau de bord)");
    log::info!("  - /receipts (Recettes)");
    log::info!("  - /expenses (Dépenses)");
    log::info!("  - /history (Historique)");
    log::info!("  - /settings (Paramètres)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    log::info!("Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================
