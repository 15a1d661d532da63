use crate::cli::args::*;
use crate::config::{resolve_credentials, resolve_host};
use crate::pfsense::{existing_names, CertificateBundle, ClientConfig, PfSenseClient};
use crate::utils::errors::{PfCertError, Result};
use crate::utils::output::OutputFormat;
use crate::utils::paths::{resolve_cert_paths, PROGRAM_NAME};
use clap::CommandFactory;
use clap_complete::generate;
use serde_json::Value;
use std::io;

pub async fn handle_command(cli: Cli) -> Result<()> {
    // Initialize logging - always to stderr
    if !cli.quiet {
        let log_level = match cli.verbose {
            0 => "pf_cert_manager=warn",  // Default: warnings only
            1 => "pf_cert_manager=info",  // -v: info level
            2 => "pf_cert_manager=debug", // -vv: debug level
            _ => "pf_cert_manager=trace", // -vvv+: trace level
        };

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(log_level)
            .init();
    }

    let output = OutputFormat::new(cli.raw);

    match cli.command {
        Commands::Import { connection, import } => {
            handle_import_command(&connection, &import, &output).await
        }
        Commands::Get { connection } => handle_get_command(&connection, &output).await,
        Commands::Completion { command } => handle_completion_command(&command),
    }
}

async fn handle_import_command(
    connection: &ConnectionArgs,
    import: &ImportArgs,
    output: &OutputFormat,
) -> Result<()> {
    let client = connect(connection).await?;
    let response = import_certificate(&client, import).await?;
    output.print_json(&response)
}

async fn handle_get_command(connection: &ConnectionArgs, output: &OutputFormat) -> Result<()> {
    let client = connect(connection).await?;
    let certificates = client.list().await?;
    output.print_json(&certificates)
}

fn handle_completion_command(command: &CompletionCommands) -> Result<()> {
    let mut cmd = Cli::command();
    generate(command.shell(), &mut cmd, PROGRAM_NAME, &mut io::stdout());
    Ok(())
}

/// Resolve credentials and host, then build the API client.
///
/// Credentials are resolved first so a missing credential aborts before
/// any network activity, gateway discovery included.
pub async fn connect(args: &ConnectionArgs) -> Result<PfSenseClient> {
    let credentials = resolve_credentials(
        args.client_id.as_deref(),
        args.client_token.as_deref(),
        &args.config,
    )?;
    let host = resolve_host(args.host.as_deref()).await?;

    let id_prefix: String = credentials.client_id.chars().take(4).collect();
    tracing::debug!("Connecting to {host} as client {id_prefix}***");

    PfSenseClient::new(ClientConfig::new(
        &host,
        credentials,
        !args.no_verify_ssl,
    ))
}

/// Replace the certificate named `import_name` with the chain and key on disk.
///
/// Both files are read before any request is made. An existing entry with the
/// same name is deleted right before the upload, since pfSense deletes by name
/// and would otherwise remove the new entry as well.
pub async fn import_certificate(client: &PfSenseClient, args: &ImportArgs) -> Result<Value> {
    let name = args.import_name.as_str();
    if name.trim().is_empty() {
        return Err(PfCertError::InvalidInput(
            "Import name must not be empty".to_string(),
        ));
    }

    let (cert_chain, private_key) =
        resolve_cert_paths(args.path.as_deref(), &args.cert_chain, &args.private_key);
    let bundle = CertificateBundle::read(&cert_chain, &private_key)?;

    let existing = existing_names(&client.list().await?);
    tracing::debug!("Existing certificates: {:?}", existing);

    if existing.iter().any(|descr| descr == name) {
        tracing::info!("Deleting existing certificate '{name}'");
        client.delete(name).await?;
    }

    tracing::info!(
        "Importing {} and {} as '{name}'",
        cert_chain.display(),
        private_key.display()
    );
    client.create_from_bundle(&bundle, name).await
}
