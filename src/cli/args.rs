use crate::utils::paths::DEFAULT_CONFIG_PATH;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pf-cert-manager")]
#[command(version = "1.0.0")]
#[command(about = "Replace TLS certificates on a pfSense firewall after ACME renewal")]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging (repeat for more verbosity: -v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON responses on a single line (no pretty-printing)
    #[arg(short, long, global = true)]
    pub raw: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a certificate into pfSense
    Import {
        #[command(flatten)]
        connection: ConnectionArgs,

        #[command(flatten)]
        import: ImportArgs,
    },
    /// Get a list of existing certs from pfSense
    Get {
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Generate shell completion scripts
    Completion {
        #[command(subcommand)]
        command: CompletionCommands,
    },
}

/// Options shared by every command that talks to pfSense
#[derive(Args, Clone, Debug)]
pub struct ConnectionArgs {
    /// Path to the credentials config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// pfSense API client ID. Falls back to the config file
    #[arg(long, env = "CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// pfSense API client token. Falls back to the config file
    #[arg(long, env = "CLIENT_TOKEN", hide_env_values = true)]
    pub client_token: Option<String>,

    /// Hostname of the pfSense router [default: reverse DNS name of the default gateway,
    /// discovered on Linux only]
    #[arg(long, env = "HOST", value_hint = clap::ValueHint::Hostname)]
    pub host: Option<String>,

    /// Ignore TLS certificate errors when talking to pfSense. Needed when addressing
    /// the router by IP or when its own certificate has expired
    #[arg(long)]
    pub no_verify_ssl: bool,
}

#[derive(Args, Clone, Debug)]
pub struct ImportArgs {
    /// Path prefix to the cert and private key files, typically
    /// '/etc/letsencrypt/live/<your site>'. Picked up from RENEWED_LINEAGE in a certbot deploy hook
    #[arg(short, long, env = "RENEWED_LINEAGE", value_hint = clap::ValueHint::DirPath)]
    pub path: Option<PathBuf>,

    /// Path to the cert chain file (relative to '--path' if it is specified)
    #[arg(short, long, default_value = "fullchain.pem", value_hint = clap::ValueHint::FilePath)]
    pub cert_chain: PathBuf,

    /// Path to the private key file (relative to '--path' if it is specified)
    #[arg(short = 'k', long, default_value = "privkey.pem", value_hint = clap::ValueHint::FilePath)]
    pub private_key: PathBuf,

    /// Name of the cert in pfSense. An existing cert with the same name is deleted and replaced
    #[arg(short, long, default_value = "LetsEncrypt")]
    pub import_name: String,
}

#[derive(Subcommand)]
pub enum CompletionCommands {
    /// Generate bash completion script
    Bash,
    /// Generate zsh completion script
    Zsh,
    /// Generate fish completion script
    Fish,
    /// Generate PowerShell completion script
    PowerShell,
}

impl CompletionCommands {
    pub fn shell(&self) -> Shell {
        match self {
            CompletionCommands::Bash => Shell::Bash,
            CompletionCommands::Zsh => Shell::Zsh,
            CompletionCommands::Fish => Shell::Fish,
            CompletionCommands::PowerShell => Shell::PowerShell,
        }
    }
}
