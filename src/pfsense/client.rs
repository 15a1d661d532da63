use crate::config::Credentials;
use crate::pfsense::CertificateBundle;
use crate::utils::errors::{PfCertError, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::path::Path;

const CERTIFICATE_ENDPOINT: &str = "api/v1/system/certificate";

/// Everything needed to talk to one pfSense host
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub verify_ssl: bool,
}

impl ClientConfig {
    /// `host` is a hostname or IP (HTTPS is assumed) or a full `scheme://host[:port]` base
    pub fn new(host: &str, credentials: Credentials, verify_ssl: bool) -> Self {
        let host = host.trim().trim_end_matches('/');
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };

        Self {
            base_url,
            credentials,
            verify_ssl,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{CERTIFICATE_ENDPOINT}", self.base_url)
    }
}

pub struct PfSenseClient {
    client: Client,
    config: ClientConfig,
}

impl PfSenseClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = super::create_http_client(config.verify_ssl)?;

        Ok(Self { client, config })
    }

    /// List all certificates
    pub async fn list(&self) -> Result<Value> {
        let url = self.config.endpoint();
        tracing::debug!("Making GET request to: {url}");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.config.credentials.authorization())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete every certificate whose display name is `name`
    pub async fn delete(&self, name: &str) -> Result<Value> {
        let url = self.config.endpoint();
        tracing::debug!("Making DELETE request to: {url} (descr: {name})");

        let response = self
            .client
            .delete(&url)
            .header(AUTHORIZATION, self.config.credentials.authorization())
            .json(&json!({ "descr": name }))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Read the chain and key from disk and import them under `name`
    pub async fn create(&self, cert_chain: &Path, private_key: &Path, name: &str) -> Result<Value> {
        let bundle = CertificateBundle::read(cert_chain, private_key)?;
        self.create_from_bundle(&bundle, name).await
    }

    /// Import an already-read certificate bundle under `name`
    pub async fn create_from_bundle(&self, bundle: &CertificateBundle, name: &str) -> Result<Value> {
        let url = self.config.endpoint();
        tracing::debug!("Making POST request to: {url} (descr: {name})");

        let payload = json!({
            "method": "import",
            "cert": bundle.cert_chain_base64(),
            "key": bundle.private_key_base64(),
            "descr": name,
            "active": true,
        });

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.config.credentials.authorization())
            .json(&payload)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle HTTP response from pfSense
    async fn handle_response(&self, response: Response) -> Result<Value> {
        let status = response.status();
        tracing::debug!("Response status: {status}");

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<Value>(&error_text)
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(|m| m.as_str())
                    .map(|m| m.to_string())
            })
            .unwrap_or(error_text);

        if status == 401 || status == 403 {
            Err(PfCertError::Auth(format!(
                "Access denied - client id/token may be invalid or lack required privileges: {message}"
            )))
        } else {
            Err(PfCertError::PfSenseApi {
                status: status.as_u16(),
                message,
            })
        }
    }
}
