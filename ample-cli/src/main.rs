use ample_core::ampache::{AmpacheClient, Credentials};
use ample_core::artists::{self, ArtistBrowse};
use ample_core::config::ClientConfig;
use ample_core::session::Session;
use ample_core::settings::{FileBackend, SettingsStore};
use ample_core::{Page, AMPLE_VERSION};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// ample: browse an Ampache server and manage player settings from a terminal.
#[derive(Parser)]
#[command(name = "ample", version)]
struct Args {
    /// Ampache server URL.
    #[arg(long, global = true, env = "AMPLE_SERVER")]
    server: Option<String>,

    /// Username for password login.
    #[arg(long, global = true, env = "AMPLE_USER")]
    user: Option<String>,

    /// Password for password login.
    #[arg(long, global = true, env = "AMPLE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// API key. Takes precedence over username and password.
    #[arg(long, global = true, env = "AMPLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Directory holding the persisted settings.
    #[arg(long, global = true, env = "AMPLE_SETTINGS_DIR")]
    settings_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List artists: unrated, newest, recent, favorite, frequent, top,
    /// forgotten, random, random-album-artists.
    Artists {
        listing: ArtistBrowse,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = ample_core::DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    /// Artists whose name contains QUERY.
    Search {
        query: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = ample_core::DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    /// One artist, with the number of albums it appears on without owning.
    Artist { id: String },
    /// Persisted player settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the settings tree.
    Show,
    /// Load server preferences and apply the language setting.
    Load,
    /// Restore every setting to its default.
    Reset,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();

    info!("ample {} starting", AMPLE_VERSION);

    if let Err(e) = run(args).await {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Config file (or .env in dev mode), with command-line flags on top.
fn resolve_config(args: &Args) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let mut config = ClientConfig::load()?;
    if let Some(server) = &args.server {
        config.server_url = Some(server.clone());
    }
    if let Some(user) = &args.user {
        config.username = Some(user.clone());
    }
    if let Some(password) = &args.password {
        config.password = Some(password.clone());
    }
    if let Some(api_key) = &args.api_key {
        config.api_key = Some(api_key.clone());
    }
    if let Some(dir) = &args.settings_dir {
        config.settings_dir = dir.clone();
    }
    Ok(config)
}

fn connect(config: &ClientConfig) -> Result<AmpacheClient, Box<dyn std::error::Error>> {
    let server_url = config.server_url()?.to_string();
    let credentials: Credentials = config.credentials()?;
    info!("Connecting to {}", server_url);
    Ok(AmpacheClient::new(server_url, credentials))
}

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(args: Args) -> CliResult {
    let config = resolve_config(&args)?;

    match args.command {
        Command::Artists {
            listing,
            page,
            limit,
        } => {
            let client = connect(&config)?;
            let artists = listing.run(&client, Page::new(page, limit)).await?;
            print_json(&artists)
        }
        Command::Search { query, page, limit } => {
            let client = connect(&config)?;
            let artists = artists::search_artists(&client, &query, Page::new(page, limit)).await?;
            print_json(&artists)
        }
        Command::Artist { id } => {
            let client = connect(&config)?;
            let artist = artists::get_artist(&client, &id).await?;
            print_json(&artist)
        }
        Command::Settings { action } => {
            let store = SettingsStore::load(Arc::new(FileBackend::new(&config.settings_dir)))?;
            match action {
                SettingsAction::Show => print_json(&store.get()),
                SettingsAction::Reset => {
                    store.reset()?;
                    print_json(&store.get())
                }
                SettingsAction::Load => {
                    let client = connect(&config)?;
                    let login_method = client.credentials().login_method();
                    store.update(|s| s.last_login_method = Some(login_method.to_string()))?;

                    let session = Session::new(Arc::new(client), store);
                    session.load_settings().await?;

                    print_json(&serde_json::json!({
                        "locale": session.locale().get(),
                        "systemPreferences": session.system_preferences().get(),
                        "userPreferences": session.user_preferences().get(),
                    }))
                }
            }
        }
    }
}
