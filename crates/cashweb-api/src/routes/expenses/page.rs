//! Expenses page rendering - Full page endpoints

use crate::{channel_options, AppState};
use cashweb_core::PaymentChannel;

/// Expense form page
pub async fn page_expenses(
    _state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let today = cashweb_core::time::today();
    let channels = channel_options(PaymentChannel::ALL, Some(PaymentChannel::Cash));

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Nouvelle dépense</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 max-w-2xl'>
            <form id='expense-form' hx-post='/expenses' hx-target='#expense-message' hx-swap='innerHTML' class='space-y-4'>
                <div><label class='block text-sm text-gray-600 mb-1'>Date</label>
                    <input type='date' name='date' value='{}' required class='w-full px-4 py-2 border rounded-lg'></div>
                <div><label class='block text-sm text-gray-600 mb-1'>Catégorie de dépense</label>
                    <input type='text' name='categorie' required placeholder='Loyer, fournitures...' class='w-full px-4 py-2 border rounded-lg'></div>
                <div><label class='block text-sm text-gray-600 mb-1'>Description / Libellé</label>
                    <input type='text' name='description' class='w-full px-4 py-2 border rounded-lg'></div>
                <div><label class='block text-sm text-gray-600 mb-1'>Justificatif (lien)</label>
                    <input type='url' name='justificatif' placeholder='https://' class='w-full px-4 py-2 border rounded-lg'></div>
                <div><label class='block text-sm text-gray-600 mb-1'>Montant</label>
                    <input type='number' name='montant' min='0' step='any' required class='w-full px-4 py-2 border rounded-lg'></div>
                <div><label class='block text-sm text-gray-600 mb-1'>Canal de paiement</label>
                    <select name='canal' required class='w-full px-4 py-2 border rounded-lg'>{}</select></div>
                <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Enregistrer la dépense</button>
                <span class='htmx-indicator text-sm text-gray-500'>Enregistrement en cours...</span>
            </form>
            <div id='expense-message' class='mt-4'></div>
        </div>"#,
        today, channels
    );

    axum::response::Html(crate::page_response(&headers, "Dépenses", "/expenses", &inner_content))
}
