use crate::utils::errors::{PfCertError, Result};
use std::path::{Path, PathBuf};

pub const PROGRAM_NAME: &str = "pf-cert-manager";
pub const DEFAULT_CONFIG_PATH: &str = "~/.pf_cert_manager.conf";

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    dirs::home_dir()
        .map(|home| home.join(rest))
        .ok_or_else(|| PfCertError::Config("Cannot determine home directory".to_string()))
}

/// Locate the cert chain and private key, joined onto the lineage prefix when one is given.
/// Without a prefix the paths are used as-is (relative paths resolve against the working directory).
pub fn resolve_cert_paths(
    prefix: Option<&Path>,
    cert_chain: &Path,
    private_key: &Path,
) -> (PathBuf, PathBuf) {
    match prefix {
        Some(dir) => (dir.join(cert_chain), dir.join(private_key)),
        None => (cert_chain.to_path_buf(), private_key.to_path_buf()),
    }
}
