//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use graphscout_api::ToolKind;
use graphscout_canvas::page_content;
use graphscout_client::GraphClient;
use graphscout_shared::{
    AppConfig, RenderFormat, config_file_path, init_config, load_config, resolve_client_secret,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// graphscout — walk a Graph tenant and render its content.
#[derive(Parser)]
#[command(
    name = "graphscout",
    version,
    about = "Fetch directory resources and render collaboration pages as Markdown.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Tenant ID (overrides the config file).
    #[arg(long, global = true)]
    pub tenant_id: Option<String>,

    /// Client ID (overrides the config file).
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch all users as identifier-keyed JSON.
    Users {
        /// Filter by given name.
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Fetch all registered applications as identifier-keyed JSON.
    Applications {
        /// Filter by display name.
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Fetch all sites with subsites, pages, and rendered page content.
    Sites {
        /// Filter by display name.
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Render one site page's content.
    Page {
        /// Site identifier.
        #[arg(long)]
        site: String,

        /// Page identifier.
        #[arg(long)]
        page: String,

        /// Output format: markdown or plain.
        #[arg(long, default_value = "markdown")]
        format: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // One directive per workspace crate; dependencies stay at warn.
    let filter = [
        "graphscout_cli",
        "graphscout_shared",
        "graphscout_client",
        "graphscout_markdown",
        "graphscout_canvas",
        "graphscout_api",
    ]
    .map(|krate| format!("{krate}={level}"))
    .join(",");
    let filter = format!("warn,{filter}");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Connection overrides taken from global CLI flags.
struct Overrides {
    tenant_id: Option<String>,
    client_id: Option<String>,
}

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let Cli {
        tenant_id,
        client_id,
        command,
        ..
    } = cli;
    let overrides = Overrides {
        tenant_id,
        client_id,
    };

    match command {
        Command::Users { name } => cmd_tool(&overrides, ToolKind::Users, name.as_deref()).await,
        Command::Applications { name } => {
            cmd_tool(&overrides, ToolKind::Applications, name.as_deref()).await
        }
        Command::Sites { name } => cmd_tool(&overrides, ToolKind::Sites, name.as_deref()).await,
        Command::Page { site, page, format } => {
            cmd_page(&overrides, &site, &page, &format).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_tool(overrides: &Overrides, kind: ToolKind, name: Option<&str>) -> Result<()> {
    let client = connect(overrides).await?;

    let spec = kind.spec();
    info!(tool = spec.name, filter = ?name, "running tool");

    let spinner = spinner(format!("Fetching {}...", spec.name));
    let output = kind.run(&client, name).await;
    spinner.finish_and_clear();

    println!("{}", output?);
    Ok(())
}

async fn cmd_page(overrides: &Overrides, site: &str, page: &str, format: &str) -> Result<()> {
    let format: RenderFormat = format.parse().map_err(|e: String| eyre!(e))?;
    let client = connect(overrides).await?;

    let spinner = spinner(format!("Rendering page {page}..."));
    let content = page_content(&client, site, page, format).await;
    spinner.finish_and_clear();

    println!("{}", content?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config file created at {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let path = config_file_path()?;
    println!("# {}", path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Client construction
// ---------------------------------------------------------------------------

async fn connect(overrides: &Overrides) -> Result<GraphClient> {
    let mut config: AppConfig = load_config()?;

    if let Some(tenant_id) = &overrides.tenant_id {
        config.graph.tenant_id = tenant_id.clone();
    }
    if let Some(client_id) = &overrides.client_id {
        config.graph.client_id = client_id.clone();
    }

    if config.graph.tenant_id.is_empty() {
        return Err(eyre!(
            "tenant id not configured; pass --tenant-id or set [graph].tenant_id in the config file"
        ));
    }
    if config.graph.client_id.is_empty() {
        return Err(eyre!(
            "client id not configured; pass --client-id or set [graph].client_id in the config file"
        ));
    }

    let secret = resolve_client_secret(&config)?;
    let client = GraphClient::connect(&config.graph, &secret).await?;
    Ok(client)
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
