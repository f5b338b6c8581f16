use std::path::PathBuf;
use std::process;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use clap::{Parser, Subcommand};
use scout_client::api_client::{ApiClient, BearerAuth, SharedToken};
use scout_client::commands;
use scout_client::config::Config;
use scout_client::location::{FixedLocation, LocationFile, LocationProvider, NoLocation};
use scout_client::logging::{self, LogTarget};
use scout_client::services::Services;
use scout_client::state::AppState;
use scout_client::tui::{self, App};
use scout_client::{Result, ScoutError};
use scout_common::api::{LoginCredentials, RegisterData, ReportsQuery, UserUpdate};
use scout_common::Location;

const HELP_TEXT: &str = r#"
  Examples
    $ scout
    $ scout --location -37.8183,144.9671
    $ scout reports --radius 2 --min-verifications 1
    $ scout create --line "Route 86" Flinders St
    $ scout verify 3f2a
    $ scout login fan@example.com
    $ scout me --username night_owl
    $ scout health
"#;

#[derive(Parser)]
#[command(
    name = "scout",
    version = env!("CARGO_PKG_VERSION"),
    about = "Report and verify ticket inspector sightings",
    after_help = HELP_TEXT
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Device location as LAT,LON
    #[arg(long, global = true, value_name = "LAT,LON", value_parser = parse_location, allow_hyphen_values = true)]
    location: Option<Location>,

    /// File whose last LAT,LON line is the device location
    #[arg(long = "location-file", global = true, value_name = "PATH")]
    location_file: Option<PathBuf>,

    /// Access token for authenticated commands (or SCOUT_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,

    /// Override api.baseUrl
    #[arg(long = "api-url", global = true, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// List sightings around the location or the default region
    Reports {
        /// Search radius in kilometres
        #[arg(long)]
        radius: Option<f64>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long = "min-verifications")]
        min_verifications: Option<u32>,
    },
    /// Show one sighting
    Show { id: String },
    /// Report a sighting at the current location
    Create {
        /// Transport line, e.g. "Route 86"
        #[arg(long)]
        line: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        anonymous: bool,
        /// Stop or station name
        #[arg(trailing_var_arg = true, required = true)]
        location_name: Vec<String>,
    },
    /// Confirm a sighting
    Verify { id: String },
    /// Delete one of your sightings
    Delete { id: String },
    /// Log in and print tokens
    Login {
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and print tokens
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Exchange a refresh token for a new access token
    Refresh { refresh_token: String },
    /// Show your profile, or change it with --username / --email
    Me {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Show another user's public profile
    User { id: String },
    /// Check that the server is up
    Health,
}

fn parse_location(s: &str) -> std::result::Result<Location, String> {
    Location::parse(s).ok_or_else(|| format!("expected LAT,LON, got '{s}'"))
}

fn location_provider(cli: &Cli) -> Box<dyn LocationProvider> {
    match (&cli.location, &cli.location_file) {
        (Some(fix), _) => Box::new(FixedLocation::new(*fix)),
        (None, Some(path)) => Box::new(LocationFile::new(path.clone())),
        (None, None) => Box::new(NoLocation),
    }
}

fn build_services(config: &Config, token: SharedToken) -> Result<Services> {
    let client = ApiClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?
    .with_request_interceptor(BearerAuth::new(token));
    Ok(Services::new(client))
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default();
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    let Some(command) = cli.command.as_ref() else {
        // The TUI starts signed out; its slot follows the Profile tab session.
        let token: SharedToken = Arc::new(RwLock::new(None));
        let services = build_services(&config, token.clone())?;
        let app = App::new(config, AppState::default(), token, location_provider(&cli));
        return tui::run(app, services);
    };

    let access = cli.token.clone().or_else(|| std::env::var("SCOUT_TOKEN").ok());
    let token: SharedToken = Arc::new(RwLock::new(access));
    let services = build_services(&config, token.clone())?;

    let position = || {
        let mut provider = location_provider(&cli);
        let mut state = AppState::default();
        if let Some(fix) = provider.poll() {
            state.map.set_current_location(fix);
        }
        state.map.report_position()
    };

    match command {
        Command::Reports {
            radius,
            limit,
            offset,
            min_verifications,
        } => {
            let center = position();
            let query = ReportsQuery {
                latitude: Some(center.latitude),
                longitude: Some(center.longitude),
                radius: radius.or(Some(config.map.search_radius_km)),
                limit: limit.or(Some(config.map.page_size)),
                offset: *offset,
                min_verifications: *min_verifications,
            };
            commands::list_reports(&services, &query)
        }
        Command::Show { id } => commands::show_report(&services, id),
        Command::Create {
            line,
            description,
            anonymous,
            location_name,
        } => {
            require_token(&token)?;
            let data = commands::create_report_data(
                position(),
                location_name,
                line.clone(),
                description.clone(),
                *anonymous,
            )?;
            commands::create_report(&services, &data)
        }
        Command::Verify { id } => {
            require_token(&token)?;
            commands::verify_report(&services, id)
        }
        Command::Delete { id } => {
            require_token(&token)?;
            commands::delete_report(&services, id)
        }
        Command::Login { email, password } => {
            let credentials = LoginCredentials {
                email: email.clone(),
                password: commands::password_or_prompt(password.clone())?,
            };
            commands::login(&services, &credentials)
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let data = RegisterData {
                username: username.clone(),
                email: email.clone(),
                password: commands::password_or_prompt(password.clone())?,
            };
            commands::register(&services, &data)
        }
        Command::Refresh { refresh_token } => commands::refresh(&services, refresh_token),
        Command::Me { username, email } => {
            require_token(&token)?;
            let update = UserUpdate {
                username: username.clone(),
                email: email.clone(),
            };
            if update.is_empty() {
                commands::me(&services)
            } else {
                commands::update_me(&services, &update)
            }
        }
        Command::User { id } => commands::show_user(&services, id),
        Command::Health => commands::health(&services),
    }
}

fn require_token(token: &SharedToken) -> Result<()> {
    let present = token.read().map(|t| t.is_some()).unwrap_or(false);
    if present {
        Ok(())
    } else {
        Err(ScoutError::Auth(
            "no access token, pass --token or set SCOUT_TOKEN (see `scout login`)".to_string(),
        ))
    }
}

fn main() {
    let cli = Cli::parse();

    let target = if cli.command.is_none() {
        match logging::default_log_file() {
            Ok(path) => LogTarget::File(path),
            Err(_) => LogTarget::Stderr,
        }
    } else {
        LogTarget::Stderr
    };
    if let Err(e) = logging::init(target) {
        eprintln!("could not start logging: {}", e);
    }

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("{}", e);
        process::exit(1);
    }
}
