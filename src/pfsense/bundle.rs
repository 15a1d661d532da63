use crate::utils::errors::{PfCertError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::Path;

/// Certificate chain and private key, read from disk as raw PEM bytes
#[derive(Clone)]
pub struct CertificateBundle {
    pub cert_chain: Vec<u8>,
    pub private_key: Vec<u8>,
}

impl CertificateBundle {
    /// Read both files fully. Nothing is uploaded until both reads succeed.
    pub fn read(cert_chain: &Path, private_key: &Path) -> Result<Self> {
        let cert_chain_bytes = fs::read(cert_chain).map_err(|e| PfCertError::io(cert_chain, e))?;
        let private_key_bytes =
            fs::read(private_key).map_err(|e| PfCertError::io(private_key, e))?;

        tracing::debug!(
            "Read {} bytes of certificate chain from {} and {} bytes of private key from {}",
            cert_chain_bytes.len(),
            cert_chain.display(),
            private_key_bytes.len(),
            private_key.display()
        );

        Ok(Self {
            cert_chain: cert_chain_bytes,
            private_key: private_key_bytes,
        })
    }

    pub fn cert_chain_base64(&self) -> String {
        STANDARD.encode(&self.cert_chain)
    }

    pub fn private_key_base64(&self) -> String {
        STANDARD.encode(&self.private_key)
    }
}
