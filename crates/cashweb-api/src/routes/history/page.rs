//! History page rendering - Full page endpoints

use crate::{channel_options, AppState};
use cashweb_core::PaymentChannel;

/// History page - filter controls and the table partial
pub async fn page_history(
    _state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Historique des transactions</h2></div>
        <form id='history-filter' hx-get='/history/list' hx-target='#history-content' class='flex flex-wrap items-end gap-3 mb-4'>
            <div><label class='block text-sm text-gray-600 mb-1'>Type</label>
                <select name='kind' class='px-4 py-2 border rounded-lg'>
                    <option value=''>Tous</option>
                    <option value='receipt'>Recette</option>
                    <option value='expense'>Dépense</option>
                </select></div>
            <div><label class='block text-sm text-gray-600 mb-1'>Canal</label>
                <select name='channel' class='px-4 py-2 border rounded-lg'>
                    <option value=''>Tous</option>{}
                </select></div>
            <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Appliquer</button>
            <button type='reset' hx-get='/history/list' hx-target='#history-content'
                class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Réinitialiser</button>
        </form>
        <div id='history-messages' class='mb-4'></div>
        <div id='history-content' hx-get='/history/list' hx-trigger='load, ledger-changed from:body' class='bg-white rounded-xl shadow-sm p-6'>
            <p class='text-gray-500 text-center'>Chargement...</p>
        </div>"#,
        channel_options(PaymentChannel::ALL, None)
    );

    axum::response::Html(crate::page_response(&headers, "Historique", "/history", &inner_content))
}
