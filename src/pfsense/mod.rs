pub mod bundle;
pub mod client;

pub use bundle::CertificateBundle;
pub use client::{ClientConfig, PfSenseClient};

use reqwest::Client;
use serde_json::Value;

/// Create the HTTP client used for every pfSense request
pub fn create_http_client(verify_ssl: bool) -> Result<Client, reqwest::Error> {
    if !verify_ssl {
        tracing::warn!("TLS certificate verification is disabled");
    }

    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .use_rustls_tls() // Use rustls with system certificate store
        .danger_accept_invalid_certs(!verify_ssl)
        .build()
}

/// Extract certificate display names from a list response's `data.cert` field.
///
/// pfSense returns the collection either as an array or as an object keyed by id.
pub fn existing_names(response: &Value) -> Vec<String> {
    let Some(certs) = response.get("data").and_then(|data| data.get("cert")) else {
        return Vec::new();
    };

    let entries: Vec<&Value> = match certs {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| entry.get("descr").and_then(|d| d.as_str()))
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_existing_names_from_array() {
        let response = json!({
            "status": "ok",
            "code": 200,
            "data": {"cert": [
                {"refid": "a1", "descr": "webConfigurator default"},
                {"refid": "b2", "descr": "LetsEncrypt"},
                {"refid": "c3"}
            ]}
        });
        assert_eq!(
            existing_names(&response),
            vec!["webConfigurator default".to_string(), "LetsEncrypt".to_string()]
        );
    }

    #[test]
    fn test_existing_names_from_object() {
        let response = json!({"data": {"cert": {"0": {"descr": "MySite"}}}});
        assert_eq!(existing_names(&response), vec!["MySite".to_string()]);
    }

    #[test]
    fn test_existing_names_missing_data() {
        assert!(existing_names(&json!({"status": "bad request", "data": []})).is_empty());
        assert!(existing_names(&json!({})).is_empty());
        assert!(existing_names(&json!({"data": {"cert": null}})).is_empty());
    }
}
