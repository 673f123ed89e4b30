//! Receipts page rendering - Full page endpoints

use crate::{channel_options, AppState};
use cashweb_core::PaymentChannel;

/// Receipt form page - the member picker is loaded by a partial
pub async fn page_receipts(
    _state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let today = cashweb_core::time::today();
    let channels = channel_options(
        PaymentChannel::ALL.into_iter().filter(PaymentChannel::accepts_receipts),
        Some(PaymentChannel::Cash),
    );

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Nouvelle recette</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 max-w-2xl'>
            <form id='receipt-form' hx-post='/receipts' hx-target='#receipt-message' hx-swap='innerHTML' class='space-y-4'>
                <div><label class='block text-sm text-gray-600 mb-1'>Date</label>
                    <input type='date' name='date' value='{}' required class='w-full px-4 py-2 border rounded-lg'></div>
                <div><label class='block text-sm text-gray-600 mb-1'>Membre concerné</label>
                    <select name='membre' required hx-get='/receipts/members' hx-trigger='load' class='w-full px-4 py-2 border rounded-lg'>
                        <option value=''>Chargement des membres...</option>
                    </select></div>
                <div><label class='block text-sm text-gray-600 mb-1'>Type de recette</label>
                    <input type='text' name='type' required placeholder='Cotisation, don...' class='w-full px-4 py-2 border rounded-lg'></div>
                <div><label class='block text-sm text-gray-600 mb-1'>Canal de paiement</label>
                    <select name='canal' required class='w-full px-4 py-2 border rounded-lg'>{}</select></div>
                <div><label class='block text-sm text-gray-600 mb-1'>Montant</label>
                    <input type='number' name='montant' min='0' step='any' required class='w-full px-4 py-2 border rounded-lg'></div>
                <div><label class='block text-sm text-gray-600 mb-1'>Description / Commentaires</label>
                    <textarea name='description' rows='3' class='w-full px-4 py-2 border rounded-lg'></textarea></div>
                <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Enregistrer la recette</button>
                <span class='htmx-indicator text-sm text-gray-500'>Enregistrement en cours...</span>
            </form>
            <div id='receipt-message' class='mt-4'></div>
        </div>"#,
        today, channels
    );

    axum::response::Html(crate::page_response(&headers, "Recettes", "/receipts", &inner_content))
}
