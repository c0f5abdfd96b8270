use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use onemapan::api::ApiClient;
use onemapan::components::events::DisplayOptions;
use onemapan::config::Config;
use onemapan::error::{auth_error, AppResult};
use onemapan::session::{Session, SessionStore, NATIONAL_AREA};
use std::path::PathBuf;
use tracing::{debug, warn};

// Export submodules
pub mod auth;
pub mod dashboard;
pub mod events;
pub mod profile;

#[derive(Parser)]
#[command(name = "onemapan")]
#[command(about = "Manage OneMapan members, qiudao records and events", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        username: String,
        /// Falls back to ONEMAPAN_PASSWORD
        #[arg(long, env = "ONEMAPAN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// List events as display rows
    Events {
        /// Event types, comma separated
        #[arg(long = "type", value_delimiter = ',')]
        event_types: Vec<String>,
        /// Areas, comma separated
        #[arg(long = "area", value_delimiter = ',')]
        areas: Vec<String>,
        /// Recurrence flags, comma separated (true,false)
        #[arg(long = "recurring", value_delimiter = ',')]
        is_recurring: Vec<bool>,
        /// First day, yyyy-mm-dd
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day, yyyy-mm-dd
        #[arg(long)]
        to: Option<NaiveDate>,
        /// One line per calendar day instead of per occurrence
        #[arg(long)]
        by_day: bool,
        /// Fail on request errors instead of showing no events
        #[arg(long)]
        strict: bool,
    },

    /// Delete an event
    EventDelete {
        id: i64,
    },

    /// Show dashboard statistics
    Dashboard {
        #[arg(long, default_value = NATIONAL_AREA)]
        area: String,
        #[arg(long, conflicts_with = "city")]
        province: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },

    /// List umat
    Umat {
        #[arg(long, default_value = "1")]
        page: u64,
        #[arg(long, default_value = "10")]
        limit: u64,
        #[arg(long)]
        search: Option<String>,
    },

    /// List qiudao records
    Qiudao {
        #[arg(long, default_value = "1")]
        page: u64,
        #[arg(long, default_value = "10")]
        limit: u64,
        #[arg(long)]
        search: Option<String>,
    },

    /// Bulk import from an .xlsx file
    Import {
        #[arg(value_enum)]
        kind: ImportKind,
        file: PathBuf,
    },

    /// List clergy
    Dianchuanshi,

    /// List institutions
    Institutions,

    /// List temples
    Fotang,

    /// List provinces, or the cities, districts or localities below one
    Locations {
        #[arg(long, conflicts_with_all = ["city", "district"])]
        province: Option<i64>,
        #[arg(long, conflicts_with = "district")]
        city: Option<i64>,
        #[arg(long)]
        district: Option<i64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportKind {
    Users,
    Qiudao,
}

/// Shared context for all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    pub store: SessionStore,
    pub api: ApiClient,
}

impl CommandContext {
    /// Create the context; an expired stored session is dropped
    pub fn new(config: Config) -> AppResult<Self> {
        let store = SessionStore::new(config.session_path());
        let mut api = ApiClient::new(&config)?;

        match store.load()? {
            Some(session) if session.is_expired_at(Utc::now().timestamp()) => {
                warn!("Stored session has expired, please log in again");
                store.clear()?;
            }
            Some(session) => {
                debug!("Restored session for area {:?}", session.area());
                api = api.with_session(session);
            }
            None => {}
        }

        Ok(Self { config, store, api })
    }

    /// The active session, or an error asking to log in
    pub fn require_session(&self) -> AppResult<&Session> {
        self.api
            .session()
            .ok_or_else(|| auth_error(&t!("cli.not_logged_in")))
    }

    pub fn display_options(&self) -> AppResult<DisplayOptions> {
        DisplayOptions::from_config(&self.config)
    }

    /// Print the pending flash message, if any
    pub fn show_flash(&self) -> AppResult<()> {
        if let Some(message) = self.store.take_flash()? {
            println!("{}", message);
        }
        Ok(())
    }
}

/// Type alias for command result
pub type CommandResult = AppResult<()>;

/// Dispatch a parsed command line
pub async fn run(cli: Cli, ctx: CommandContext) -> CommandResult {
    ctx.show_flash()?;

    match cli.command {
        Commands::Login { username, password } => auth::login(&ctx, &username, &password).await,
        Commands::Logout => auth::logout(&ctx),
        Commands::Whoami => auth::whoami(&ctx),
        Commands::Register {
            username,
            email,
            password,
            confirm_password,
        } => auth::register(&ctx, &username, &email, &password, &confirm_password).await,
        Commands::Events {
            event_types,
            areas,
            is_recurring,
            from,
            to,
            by_day,
            strict,
        } => {
            let filter = onemapan::components::events::EventFilter {
                event_types,
                areas,
                is_recurring,
                start_date: from,
                end_date: to,
            };
            events::list(&ctx, &filter, by_day, strict).await
        }
        Commands::EventDelete { id } => events::delete(&ctx, id).await,
        Commands::Dashboard {
            area,
            province,
            city,
        } => dashboard::show(&ctx, area, province, city).await,
        Commands::Umat {
            page,
            limit,
            search,
        } => profile::list_users(&ctx, page, limit, search).await,
        Commands::Qiudao {
            page,
            limit,
            search,
        } => profile::list_qiudao(&ctx, page, limit, search).await,
        Commands::Import { kind, file } => profile::import(&ctx, kind, &file).await,
        Commands::Dianchuanshi => profile::list_dianchuanshi(&ctx).await,
        Commands::Institutions => profile::list_institutions(&ctx).await,
        Commands::Fotang => profile::list_fotang(&ctx).await,
        Commands::Locations {
            province,
            city,
            district,
        } => profile::list_locations(&ctx, province, city, district).await,
    }
}
