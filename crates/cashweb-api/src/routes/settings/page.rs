//! Settings page rendering - Full page endpoints

use crate::AppState;
use cashweb_config::BalanceBucket;
use cashweb_utils::escape_html;
use std::collections::BTreeMap;

fn bucket_label(bucket: BalanceBucket) -> &'static str {
    match bucket {
        BalanceBucket::Cash => "Espèces",
        BalanceBucket::Bank => "Bancaire",
        BalanceBucket::MobileA => "Orange Money",
        BalanceBucket::MobileB => "MTN Mobile Money",
    }
}

fn mapping_rows(table: &BTreeMap<String, BalanceBucket>) -> String {
    table
        .iter()
        .map(|(label, bucket)| {
            format!(
                "<div class='flex justify-between py-1 border-b'><span>{}</span><span class='font-medium'>{}</span></div>",
                escape_html(label),
                bucket_label(*bucket)
            )
        })
        .collect()
}

pub async fn page_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let config = &state.config;

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Paramètres</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Serveur</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Adresse</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Port</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Service de la feuille de calcul</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div class='col-span-2'><p class='text-sm text-gray-500'>URL</p><p class='font-medium break-all'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Délai d'attente</p><p class='font-medium'>{} s</p></div>
                <div><p class='text-sm text-gray-500'>Fuseau des dates</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Affectation des canaux</h3>
            <div class='grid grid-cols-2 gap-6'>
                <div><p class='text-sm text-gray-500 mb-2'>Recettes</p>{}</div>
                <div><p class='text-sm text-gray-500 mb-2'>Dépenses</p>{}</div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>Devise</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Symbole</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Exemple</p><p class='font-medium'>{}</p></div>
            </div>
        </div>"#,
        escape_html(&config.server.host),
        config.server.port,
        escape_html(&config.remote.base_url),
        config.remote.timeout_secs,
        escape_html(&config.dates.timezone),
        mapping_rows(&config.balances.receipts),
        mapping_rows(&config.balances.expenses),
        escape_html(&config.currency.symbol),
        escape_html(&state.money(cashweb_core::Decimal::new(1234567, 0)))
    );

    axum::response::Html(crate::page_response(&headers, "Paramètres", "/settings", &inner_content))
}

#[cfg(test)]
mod tests {
    use crate::tests::{app, get, MemoryTransport};

    #[tokio::test]
    async fn test_settings_page() {
        let (router, _) = app(MemoryTransport::default());
        let (_, body) = get(router, "/settings").await;
        assert!(body.contains("8081"));
        assert!(body.contains("Fuseau des dates</p><p class='font-medium'>local</p>"));
        assert!(body.contains("<span>Carte bancaire</span><span class='font-medium'>Bancaire</span>"));
        assert!(body.contains("CFA 1\u{202f}234\u{202f}567"));
    }
}
