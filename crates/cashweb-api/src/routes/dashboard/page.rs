//! Dashboard page rendering - Full page endpoints

use crate::AppState;

/// Dashboard page - balance cards are loaded by the partial
pub async fn page_dashboard(
    _state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let inner_content = r#"<div class='flex items-center justify-between mb-6'>
            <h2 class='text-2xl font-bold'>Tableau de bord</h2>
            <button hx-get='/dashboard/balances' hx-target='#balances-content'
                class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Actualiser</button>
        </div>
        <div id='balances-messages' class='mb-4'></div>
        <div id='balances-content' hx-get='/dashboard/balances' hx-trigger='load, ledger-changed from:body'>
            <p class='text-gray-500 text-center'>Chargement...</p>
        </div>
        <div class='grid grid-cols-1 md:grid-cols-2 gap-4 mt-6'>
            <a href='/receipts' class='bg-white rounded-xl shadow-sm p-6 hover:bg-gray-50'><p class='font-semibold'>Ajouter une recette</p></a>
            <a href='/expenses' class='bg-white rounded-xl shadow-sm p-6 hover:bg-gray-50'><p class='font-semibold'>Ajouter une dépense</p></a>
        </div>"#;

    axum::response::Html(crate::page_response(&headers, "Tableau de bord", "/", inner_content))
}

#[cfg(test)]
mod tests {
    use crate::tests::{app, get, MemoryTransport};

    #[tokio::test]
    async fn test_dashboard_page_loads_partial() {
        let (router, _) = app(MemoryTransport::default());
        let (_, body) = get(router, "/").await;
        assert!(body.contains("hx-get='/dashboard/balances'"));
        assert!(body.contains("ledger-changed from:body"));
        assert!(body.contains("<div id='balances-messages'"));
    }
}
