mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use focusgate_core::config::get_data_dir;

use commands::{areas, check, config, daemon, focus, sites};

#[derive(Parser)]
#[command(name = "focusgate")]
#[command(about = "Focus mode: block distracting sites, gate the rest on relevance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Turn focus mode on
    On,
    /// Turn focus mode off
    Off,
    /// Flip focus mode
    Toggle,
    /// Show focus mode, focus areas and daemon status
    Status,
    /// Manage focus areas
    Areas {
        #[command(subcommand)]
        action: AreasAction,
    },
    /// Manage per-site overrides
    Sites {
        #[command(subcommand)]
        action: SitesAction,
    },
    /// Run a URL through the policy (and the relevance check if needed)
    Check {
        url: String,
        /// Text extracted from the page
        #[arg(short, long)]
        content: Option<String>,
        /// If the page is gated, wait out the countdown and continue with this reason
        #[arg(short, long)]
        justify: Option<String>,
    },
    /// Remote relevance evaluation settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Run the background daemon in the foreground
    Serve,
}

#[derive(Subcommand, Debug)]
enum AreasAction {
    /// List focus areas
    List,
    /// Add a focus area
    Add { area: String },
    /// Remove a focus area
    Remove { area: String },
}

#[derive(Subcommand, Debug)]
enum SitesAction {
    /// Show built-in sites and overrides
    List,
    /// Override a site: blocked, smart or allowed
    Set { site: String, state: String },
    /// Drop the override for a site
    Clear { site: String },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Get a configuration value
    Get {
        /// provider, model, api_key, base_url, enabled or timeout_seconds
        key: String,
    },
    /// Set a configuration value
    Set { key: String, value: String },
    /// Reset a configuration value to its default
    Unset { key: String },
    /// List all configuration values
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let data_dir = get_data_dir()?;

    match cli.command {
        Commands::On => focus::set_focus_mode(&data_dir, Some(true)).await,
        Commands::Off => focus::set_focus_mode(&data_dir, Some(false)).await,
        Commands::Toggle => focus::set_focus_mode(&data_dir, None).await,
        Commands::Status => focus::show_status(&data_dir).await,
        Commands::Areas { action } => match action {
            AreasAction::List => areas::list_areas(),
            AreasAction::Add { area } => areas::add_area(&data_dir, &area).await,
            AreasAction::Remove { area } => areas::remove_area(&data_dir, &area).await,
        },
        Commands::Sites { action } => match action {
            SitesAction::List => sites::list_sites(),
            SitesAction::Set { site, state } => sites::set_site(&data_dir, &site, &state).await,
            SitesAction::Clear { site } => sites::clear_site(&site),
        },
        Commands::Check {
            url,
            content,
            justify,
        } => check::check_url(&url, content, justify).await,
        Commands::Config { action } => match action {
            ConfigAction::Get { key } => config::handle_config_get(&key),
            ConfigAction::Set { key, value } => config::handle_config_set(&key, &value),
            ConfigAction::Unset { key } => config::handle_config_unset(&key),
            ConfigAction::List => config::handle_config_list(),
        },
        Commands::Serve => daemon::serve().await,
    }
}
