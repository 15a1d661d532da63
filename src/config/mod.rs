use crate::utils::errors::{PfCertError, Result};
use crate::utils::paths::expand_home;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

const CLIENT_ID_KEY: &str = "client_id";
const CLIENT_TOKEN_KEY: &str = "client_token";

/// pfSense API client credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_token: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_token: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_token: client_token.into(),
        }
    }

    /// Value of the `Authorization` header: `{client_id} {client_token}`
    pub fn authorization(&self) -> String {
        format!("{} {}", self.client_id, self.client_token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_token", &"***")
            .finish()
    }
}

/// Fill in missing credentials from the config file.
///
/// Values given on the command line (or through `CLIENT_ID` / `CLIENT_TOKEN`,
/// which clap folds into the same argument) win. The config file is only read
/// when at least one of them is missing or empty.
pub fn resolve_credentials(
    cli_id: Option<&str>,
    cli_token: Option<&str>,
    config_path: &Path,
) -> Result<Credentials> {
    let cli_id = non_empty(cli_id);
    let cli_token = non_empty(cli_token);

    if let (Some(id), Some(token)) = (cli_id, cli_token) {
        return Ok(Credentials::new(id, token));
    }

    let config_path = expand_home(config_path)?;
    tracing::debug!("Loading credentials from {}", config_path.display());
    let values = load_config_file(&config_path)?;

    let lookup = |key: &str| -> Result<String> {
        values
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or_else(|| {
                PfCertError::Config(format!(
                    "'{key}' was not given on the command line or in the environment, and is missing from {}",
                    config_path.display()
                ))
            })
    };

    let client_id = match cli_id {
        Some(id) => id.to_string(),
        None => lookup(CLIENT_ID_KEY)?,
    };
    let client_token = match cli_token {
        Some(token) => token.to_string(),
        None => lookup(CLIENT_TOKEN_KEY)?,
    };

    Ok(Credentials::new(client_id, client_token))
}

/// Read the credentials file into a flat key/value map
pub fn load_config_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Err(PfCertError::Config(format!(
            "Credentials are incomplete and config file {} does not exist",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        PfCertError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    Ok(parse_config(&content))
}

/// Parse either a YAML mapping or plain `key = value` / `key: value` lines.
///
/// Values are kept as written: a YAML scalar that would load as a number or
/// boolean (`1e5`, `00ff`, `true`) is taken verbatim from its line instead.
pub fn parse_config(content: &str) -> HashMap<String, String> {
    let raw = parse_key_value_lines(content);

    if let Ok(serde_yaml::Value::Mapping(mapping)) = serde_yaml::from_str(content) {
        return mapping
            .into_iter()
            .filter_map(|(key, value)| {
                let key = yaml_key(key)?;
                let value = match value {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(_) | serde_yaml::Value::Bool(_) => {
                        raw.get(&key)?.clone()
                    }
                    _ => return None,
                };
                Some((key, value))
            })
            .collect();
    }

    raw
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        _ => None,
    }
}

fn parse_key_value_lines(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .filter(|line| !(line.starts_with('[') && line.ends_with(']')))
        .filter_map(|line| {
            let separator = line.find(['=', ':'])?;
            let (key, value) = (&line[..separator], &line[separator + 1..]);
            Some((key.trim().to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Pick the router host: explicit value first, network discovery last.
///
/// Discovery only runs when nothing was given, so `--help` and explicit
/// `--host` invocations never touch the network.
pub async fn resolve_host(cli_host: Option<&str>) -> Result<String> {
    if let Some(host) = non_empty(cli_host) {
        return Ok(host.trim().to_string());
    }

    tracing::info!("No host given, attempting default gateway discovery...");
    crate::utils::gateway::default_gateway_name()
        .await
        .ok_or_else(|| {
            PfCertError::Config(
                "No host given (--host or HOST) and none could be discovered from the default gateway"
                    .to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cli_values_skip_config_file() {
        let creds =
            resolve_credentials(Some("id"), Some("token"), Path::new("/nonexistent/conf")).unwrap();
        assert_eq!(creds, Credentials::new("id", "token"));
    }

    #[test]
    fn test_missing_values_come_from_config() {
        let file = config_file("client_id: file-id\nclient_token: file-token\n");

        let creds = resolve_credentials(None, None, file.path()).unwrap();
        assert_eq!(creds, Credentials::new("file-id", "file-token"));
    }

    #[test]
    fn test_cli_value_wins_over_config() {
        let file = config_file("client_id: file-id\nclient_token: file-token\n");

        let creds = resolve_credentials(Some("cli-id"), None, file.path()).unwrap();
        assert_eq!(creds, Credentials::new("cli-id", "file-token"));

        let creds = resolve_credentials(None, Some("cli-token"), file.path()).unwrap();
        assert_eq!(creds, Credentials::new("file-id", "cli-token"));
    }

    #[test]
    fn test_empty_cli_value_counts_as_missing() {
        let file = config_file("client_id = file-id\nclient_token = file-token\n");

        let creds = resolve_credentials(Some(""), Some("cli-token"), file.path()).unwrap();
        assert_eq!(creds, Credentials::new("file-id", "cli-token"));
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let result = resolve_credentials(None, Some("token"), Path::new("/nonexistent/conf"));
        assert!(matches!(result, Err(PfCertError::Config(_))));
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let file = config_file("client_id: file-id\n");

        let result = resolve_credentials(None, None, file.path());
        match result {
            Err(PfCertError::Config(msg)) => assert!(msg.contains("client_token")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_key_value_config() {
        let values = parse_config(
            "# pfSense API\n[pfsense]\nclient_id = \"abc\"\n; comment\nclient_token='def'\n",
        );
        assert_eq!(values.get("client_id").map(String::as_str), Some("abc"));
        assert_eq!(values.get("client_token").map(String::as_str), Some("def"));
    }

    #[test]
    fn test_parse_yaml_config_with_numbers() {
        let values = parse_config("client_id: 61626364\nclient_token: secret\n");
        assert_eq!(values.get("client_id").map(String::as_str), Some("61626364"));
        assert_eq!(values.get("client_token").map(String::as_str), Some("secret"));
    }

    #[test]
    fn test_yaml_values_kept_verbatim() {
        let values = parse_config("client_id: 00000123\nclient_token: 1e5\n");
        assert_eq!(values.get("client_id").map(String::as_str), Some("00000123"));
        assert_eq!(values.get("client_token").map(String::as_str), Some("1e5"));

        let values = parse_config("client_id: true\nclient_token: 0x1F\n");
        assert_eq!(values.get("client_id").map(String::as_str), Some("true"));
        assert_eq!(values.get("client_token").map(String::as_str), Some("0x1F"));
    }

    #[test]
    fn test_first_separator_splits_line() {
        let values = parse_config("client_id: abc\nclient_token: dG9rZW4=\n");
        assert_eq!(values.get("client_token").map(String::as_str), Some("dG9rZW4="));

        let values = parse_config("[pfsense]\nclient_token = a:b\n");
        assert_eq!(values.get("client_token").map(String::as_str), Some("a:b"));
    }

    #[test]
    fn test_debug_hides_token() {
        let creds = Credentials::new("id", "very-secret");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("very-secret"));
        assert_eq!(creds.authorization(), "id very-secret");
    }

    #[tokio::test]
    async fn test_explicit_host_skips_discovery() {
        let host = resolve_host(Some(" pfsense.lan ")).await.unwrap();
        assert_eq!(host, "pfsense.lan");
    }
}
