pub mod cli;
pub mod config;
pub mod pfsense;
pub mod utils;

pub use cli::{args, commands};
pub use config::{resolve_credentials, resolve_host, Credentials};
pub use pfsense::{CertificateBundle, ClientConfig, PfSenseClient};
pub use utils::{errors, paths};
