//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::error::TransportError;
use crate::types::{Action, Envelope, Row};
use crate::LedgerTransport;

/// Direct request/response client for the ledger web app
#[derive(Debug, Clone)]
pub struct HttpLedgerTransport {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpLedgerTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url.trim()).map_err(|_| TransportError::InvalidUrl {
            url: base_url.to_string(),
        })?;

        match base_url.scheme() {
            "http" | "https" => {}
            _ => {
                return Err(TransportError::InvalidUrl {
                    url: base_url.to_string(),
                })
            }
        }

        // Script hosts answer with a redirect to the rendered content
        let http = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| TransportError::Network {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    fn endpoint(&self, action: Action) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("action", action.as_str());
        url
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                millis: self.timeout.as_millis() as u64,
            }
        } else {
            TransportError::Network {
                message: error.to_string(),
            }
        }
    }

    /// Read the body of a response and unwrap the envelope
    async fn read_envelope(&self, action: Action, response: reqwest::Response) -> Result<Envelope, TransportError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            log::debug!("{} answered HTTP {}", action, status);
            return Err(TransportError::Network {
                message: format!("HTTP {} - {}", status, body.trim()),
            });
        }

        Envelope::parse(&body)
    }
}

#[async_trait]
impl LedgerTransport for HttpLedgerTransport {
    async fn fetch_list(&self, action: Action, params: &[(String, String)]) -> Result<Vec<Row>, TransportError> {
        log::debug!("GET {} ({} params)", action, params.len());

        let response = self
            .http
            .get(self.endpoint(action))
            .query(params)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let rows = self.read_envelope(action, response).await?.into_rows()?;
        log::debug!("{} returned {} rows", action, rows.len());
        Ok(rows)
    }

    async fn submit(&self, action: Action, fields: &[(String, String)]) -> Result<(), TransportError> {
        log::debug!("POST {} ({} fields)", action, fields.len());

        let response = self
            .http
            .post(self.endpoint(action))
            .form(fields)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.read_envelope(action, response).await?.into_checked()?;
        log::debug!("{} accepted", action);
        Ok(())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Form, Json, Router};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Received = Arc<Mutex<Vec<(HashMap<String, String>, HashMap<String, String>)>>>;

    async fn mock_get(Query(query): Query<HashMap<String, String>>) -> (StatusCode, String) {
        let body = match query.get("action").map(String::as_str) {
            Some("getReceipts") => serde_json::json!({
                "success": true,
                "data": [
                    {"Date": "2024-01-03", "Montant": 1000, "CanaldePaiement": "Espèces"},
                    {"Date": "2024-01-04", "Montant": "250", "CanaldePaiement": "Orange Money"}
                ]
            })
            .to_string(),
            Some("getExpenses") => serde_json::json!({"success": false, "message": "Feuille Dépenses introuvable"}).to_string(),
            Some("getAllMembers") => {
                if query.get("page").map(String::as_str) == Some("2") {
                    serde_json::json!({"success": true, "data": [{"Nom": "Diallo", "Prénom": "Awa"}]}).to_string()
                } else {
                    serde_json::json!({"success": true, "data": []}).to_string()
                }
            }
            _ => return (StatusCode::BAD_REQUEST, "unknown action".to_string()),
        };
        (StatusCode::OK, body)
    }

    async fn mock_post(
        State(received): State<Received>,
        Query(query): Query<HashMap<String, String>>,
        Form(form): Form<HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        let rejected = form.get("montant").map(String::as_str) == Some("-1");
        received.lock().unwrap().push((query, form));
        if rejected {
            Json(serde_json::json!({"success": false, "message": "Montant invalide"}))
        } else {
            Json(serde_json::json!({"success": true, "message": "Ajouté"}))
        }
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/exec", addr)
    }

    async fn spawn_mock() -> (String, Received) {
        let received: Received = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/exec", get(mock_get).post(mock_post))
            .with_state(received.clone());
        (spawn(router).await, received)
    }

    fn transport(url: &str) -> HttpLedgerTransport {
        HttpLedgerTransport::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_urls() {
        assert!(matches!(
            HttpLedgerTransport::new("not a url", Duration::from_secs(1)),
            Err(TransportError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpLedgerTransport::new("ftp://example.org/exec", Duration::from_secs(1)),
            Err(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_endpoint_keeps_existing_query() {
        let transport = transport("https://example.org/exec?v=2");
        let url = transport.endpoint(Action::GetReceipts);
        assert_eq!(url.as_str(), "https://example.org/exec?v=2&action=getReceipts");
    }

    #[tokio::test]
    async fn test_fetch_list_returns_rows() {
        let (url, _) = spawn_mock().await;
        let rows = transport(&url).fetch_list(Action::GetReceipts, &[]).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["CanaldePaiement"], serde_json::json!("Orange Money"));
    }

    #[tokio::test]
    async fn test_fetch_list_sends_params() {
        let (url, _) = spawn_mock().await;
        let params = vec![("page".to_string(), "2".to_string())];
        let rows = transport(&url).fetch_list(Action::GetAllMembers, &params).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_list_remote_failure() {
        let (url, _) = spawn_mock().await;
        let err = transport(&url).fetch_list(Action::GetExpenses, &[]).await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Remote { message: "Feuille Dépenses introuvable".to_string() }
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let (url, _) = spawn_mock().await;
        let transport = transport(&url);
        let response = transport
            .http
            .get(transport.base_url.clone())
            .send()
            .await
            .unwrap();
        let err = transport.read_envelope(Action::GetReceipts, response).await.unwrap_err();
        match err {
            TransportError::Network { message } => assert!(message.contains("400")),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_posts_form_fields() {
        let (url, received) = spawn_mock().await;
        let fields = vec![
            ("date".to_string(), "2024-02-01".to_string()),
            ("membre".to_string(), "Diallo Awa".to_string()),
            ("montant".to_string(), "5000".to_string()),
        ];
        transport(&url).submit(Action::AddReceipt, &fields).await.unwrap();

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let (query, form) = &received[0];
        assert_eq!(query.get("action").map(String::as_str), Some("addReceipt"));
        assert_eq!(form.get("membre").map(String::as_str), Some("Diallo Awa"));
        assert_eq!(form.get("date").map(String::as_str), Some("2024-02-01"));
    }

    #[tokio::test]
    async fn test_submit_remote_rejection() {
        let (url, _) = spawn_mock().await;
        let fields = vec![("montant".to_string(), "-1".to_string())];
        let err = transport(&url).submit(Action::AddExpense, &fields).await.unwrap_err();
        assert_eq!(err, TransportError::Remote { message: "Montant invalide".to_string() });
    }

    #[tokio::test]
    async fn test_timeout() {
        async fn slow() -> &'static str {
            tokio::time::sleep(Duration::from_secs(3)).await;
            r#"{"success":true,"data":[]}"#
        }
        let url = spawn(Router::new().route("/exec", get(slow))).await;
        let transport = HttpLedgerTransport::new(&url, Duration::from_millis(200)).unwrap();
        let err = transport.fetch_list(Action::GetReceipts, &[]).await.unwrap_err();
        assert_eq!(err, TransportError::Timeout { millis: 200 });
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/exec", addr);
        let err = transport(&url).fetch_list(Action::GetReceipts, &[]).await.unwrap_err();
        assert!(matches!(err, TransportError::Network { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        async fn html() -> &'static str {
            "<html><body>Sign in</body></html>"
        }
        let url = spawn(Router::new().route("/exec", get(html))).await;
        let err = transport(&url).fetch_list(Action::GetReceipts, &[]).await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidResponse { .. }));
    }
}
