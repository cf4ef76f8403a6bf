//! OneView CLI - server profile provisioning and host record migration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hostconfig::{
    migrate_host_metadata_v0_to_v1, migrate_host_v0_to_v1, HostMetadataV0, HostV0,
    MigrationDefaults, DEFAULT_INSTALL_URL,
};
use oneview::{
    ClientConfig, OneView, OneViewClient, PollConfig, ServerHardware, ServerProfile, TaskOutcome,
};

/// OneView CLI - provision server profiles on HPE OneView.
#[derive(Parser)]
#[command(name = "oneview")]
#[command(about = "Provision server profiles and migrate host records")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Appliance URL (or set `ONEVIEW_ENDPOINT` env var).
    #[arg(long, env = "ONEVIEW_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Login user (or set `ONEVIEW_USER` env var).
    #[arg(long, env = "ONEVIEW_USER", global = true)]
    user: Option<String>,

    /// Login password (or set `ONEVIEW_PASSWORD` env var).
    #[arg(long, env = "ONEVIEW_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    /// Login domain (or set `ONEVIEW_DOMAIN` env var).
    #[arg(long, env = "ONEVIEW_DOMAIN", default_value = "LOCAL", global = true)]
    domain: String,

    /// REST API version (or set `ONEVIEW_API_VERSION` env var).
    #[arg(long, env = "ONEVIEW_API_VERSION", default_value = "120", global = true)]
    api_version: u32,

    /// Accept self-signed appliance certificates (or set `ONEVIEW_INSECURE`).
    #[arg(long, env = "ONEVIEW_INSECURE", default_value = "false", global = true)]
    insecure: bool,
}

impl ConnectionArgs {
    fn client_config(&self) -> Result<ClientConfig> {
        let (Some(endpoint), Some(username), Some(password)) =
            (&self.endpoint, &self.user, &self.password)
        else {
            bail!("--endpoint, --user and --password are required for appliance commands");
        };

        Ok(ClientConfig {
            endpoint: endpoint.clone(),
            username: username.clone(),
            password: password.clone(),
            auth_login_domain: self.domain.clone(),
            api_version: self.api_version,
            accept_invalid_certs: self.insecure,
            ..ClientConfig::default()
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a server profile.
    #[command(group(ArgGroup::new("by").required(true).args(["name", "serial_number"])))]
    Get {
        /// Profile name.
        #[arg(long)]
        name: Option<String>,

        /// Server serial number.
        #[arg(long)]
        serial_number: Option<String>,
    },

    /// Create a server profile from a template profile and wait for it.
    Create {
        /// Name of the template profile.
        #[arg(long)]
        template: String,

        /// Name of the new profile.
        #[arg(long)]
        name: String,

        /// URI of the server hardware to assign.
        #[arg(long)]
        server_hardware_uri: String,

        /// Seconds between task polls.
        #[arg(long, default_value = "10")]
        wait_secs: u32,

        /// Task polls before giving up.
        #[arg(long, default_value = "36")]
        max_iterations: u32,
    },

    /// Migrate a legacy (V0) host record to the nested (V1) layout.
    MigrateHost {
        /// Legacy record (JSON).
        #[arg(long)]
        input: PathBuf,

        /// Output file (stdout when omitted).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Machine name; defaults to the input file stem.
        #[arg(long)]
        name: Option<String>,

        /// Engine install script URL for the migrated record.
        #[arg(long, default_value = DEFAULT_INSTALL_URL)]
        install_url: String,

        /// Disable engine TLS verification in the migrated record.
        #[arg(long, default_value = "false")]
        no_tls_verify: bool,
    },

    /// Migrate legacy (V0) host metadata to the current layout.
    MigrateMetadata {
        /// Legacy metadata (JSON).
        #[arg(long)]
        input: PathBuf,

        /// Output file (stdout when omitted).
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("Failed to serialize record")?;
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote migrated record");
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn print_profile(profile: &ServerProfile) {
    println!("\nProfile Details:");
    println!("  Name:          {}", profile.spec.name);
    println!("  Description:   {}", profile.spec.description);
    println!("  URI:           {}", profile.identity.uri.as_deref().unwrap_or("-"));
    println!(
        "  Serial Number: {}",
        profile.identity.serial_number.as_deref().unwrap_or("-")
    );
    println!(
        "  Hardware:      {}",
        profile.identity.server_hardware_uri.as_deref().unwrap_or("-")
    );
    println!("  State:         {}", profile.identity.state.as_deref().unwrap_or("-"));
    println!("  Status:        {}", profile.identity.status.as_deref().unwrap_or("-"));
    println!("  Connections:   {}", profile.spec.connections.len());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Get {
            name,
            serial_number,
        } => {
            let client = OneViewClient::new(cli.connection.client_config()?)
                .context("Failed to create OneView client")?;
            let one_view = OneView::new(client, PollConfig::default());

            let profile = match (name, serial_number) {
                (Some(name), _) => one_view.get_profile_by_name(&name).await?,
                (None, Some(serial)) => one_view.get_profile_by_serial_number(&serial).await?,
                (None, None) => bail!("--name or --serial-number is required"),
            };

            match profile {
                Some(profile) => print_profile(&profile),
                None => println!("No profile found"),
            }
        }

        Commands::Create {
            template,
            name,
            server_hardware_uri,
            wait_secs,
            max_iterations,
        } => {
            let client = OneViewClient::new(cli.connection.client_config()?)
                .context("Failed to create OneView client")?;
            let poll = PollConfig {
                wait_secs,
                max_iterations,
                ..PollConfig::default()
            };
            let one_view = OneView::new(client, poll);

            let Some(template_profile) = one_view.get_profile_by_name(&template).await? else {
                bail!("Template profile '{template}' not found");
            };

            let hardware = ServerHardware::from_uri(server_hardware_uri);
            let report = one_view
                .create_profile_from_template(&name, &template_profile, &hardware)
                .await
                .context("Failed to create server profile")?;

            match report.outcome {
                TaskOutcome::Completed => {
                    println!("\n✅ Server profile {name} created");
                }
                TaskOutcome::TimedOut => {
                    bail!(
                        "Gave up waiting for profile {name} after {} polls; task {} is {}",
                        report.polls,
                        report.task.uri().unwrap_or("-"),
                        report.task.resource().task_state
                    );
                }
                TaskOutcome::Failed => {
                    bail!(
                        "Profile {name} could not be created: {}",
                        report
                            .task
                            .resource()
                            .first_error_message()
                            .unwrap_or(report.task.resource().task_status.as_str())
                    );
                }
            }
        }

        Commands::MigrateHost {
            input,
            output,
            name,
            install_url,
            no_tls_verify,
        } => {
            let mut legacy: HostV0 = read_json(&input)?;
            legacy.name = name.unwrap_or_else(|| {
                input
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
            let defaults = MigrationDefaults {
                tls_verify: !no_tls_verify,
                install_url,
            };
            let migrated = migrate_host_v0_to_v1(&legacy, &defaults);
            write_json(&migrated, output.as_deref())?;
        }

        Commands::MigrateMetadata { input, output } => {
            let legacy: HostMetadataV0 = read_json(&input)?;
            let migrated = migrate_host_metadata_v0_to_v1(&legacy);
            write_json(&migrated, output.as_deref())?;
        }
    }

    Ok(())
}
