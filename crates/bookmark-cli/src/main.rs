use std::io;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use bookmark_core::App;
use bookmark_term::{AppStateProps, Config, ConfigKey, Tab};
use clap::builder::PossibleValuesParser;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

mod browser;
mod commands;
mod logging;
mod messages;

#[derive(Parser, Debug)]
#[command(
    name = "bookmark-manager",
    author,
    version,
    about = "Bookmark folders and jump back to them from the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(
        id = "config-file",
        long = "config-file",
        global = true,
        value_name = "PATH",
        help = "Path to the config file"
    )]
    config_file: Option<String>,

    #[arg(
        id = "database",
        long = "database",
        global = true,
        env = "BM_DATABASE",
        value_name = "PATH",
        help = "Path to the bookmark database"
    )]
    database: Option<String>,

    #[arg(
        id = "log-file",
        long = "log-file",
        global = true,
        value_name = "PATH",
        help = "Log file used while the browser is open"
    )]
    log_file: Option<String>,

    #[arg(
        id = "log-level",
        long = "log-level",
        global = true,
        env = "BM_LOGLEVEL",
        value_parser = PossibleValuesParser::new(logging::LOG_LEVELS),
        help = "Log level"
    )]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Commands {
    /// Bookmark the current directory
    Add {
        /// Category for the new bookmark
        category: Option<String>,
    },
    /// Browse bookmarks interactively (default)
    List {
        /// Category tab to start on
        category: Option<String>,
        /// Initial filter text
        filter: Option<String>,
        /// Write the chosen folder to this file and exit, for shell `cd` wrappers
        #[arg(long, value_name = "PATH")]
        cwd_file: Option<PathBuf>,
    },
    /// Print bookmarks as JSON
    Export {
        /// Only export this category
        category: Option<String>,
        /// Only export bookmarks whose folder or category contains this text
        filter: Option<String>,
    },
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum ConfigCommands {
    /// Print the default config.toml
    Default,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::List {
            category: None,
            filter: None,
            cwd_file: None,
        }
    }
}

async fn run() -> Result<()> {
    let cmd = Cli::command();
    let matches = cmd.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let mut arg_matches = vec![&matches];
    if let Some((_, sub_matches)) = matches.subcommand() {
        arg_matches.push(sub_matches);
    }
    Config::load(&cmd, arg_matches).await?;

    let command = cli.command.unwrap_or_default();
    logging::init(matches!(command, Commands::List { .. }))?;
    log::debug!(
        "resolved config: config_file={} database={} log_file={} log_level={}",
        Config::get(ConfigKey::ConfigFile),
        Config::get(ConfigKey::Database),
        Config::get(ConfigKey::LogFile),
        Config::get(ConfigKey::LogLevel)
    );

    match command {
        Commands::Add { category } => {
            let app = App::open(Config::database_path())?;
            commands::add(&app, category)
        }
        Commands::List {
            category,
            filter,
            cwd_file,
        } => {
            let app = App::open(Config::database_path())?;
            let props = AppStateProps {
                initial_tab: Tab::parse(&category.unwrap_or_default()),
                initial_filter: filter.unwrap_or_default(),
                cwd_file,
            };
            browser::run(app, props).await
        }
        Commands::Export { category, filter } => {
            let app = App::open(Config::database_path())?;
            commands::export(&app, category, filter, &mut std::io::stdout().lock())
        }
        Commands::Config {
            command: ConfigCommands::Default,
        } => {
            println!("{}", Config::serialize_default(&cmd));
            Ok(())
        }
    }
}

/// Prints the one styled failure line. The full error chain only goes to the
/// debug log.
fn report_failure<W: Write>(err: &anyhow::Error, out: &mut W) -> i32 {
    log::debug!("{err:?}");
    if let Err(write_err) = messages::error(out, &err.to_string()) {
        log::debug!("failed to print error: {write_err}");
    }

    1
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        let code = report_failure(&err, &mut io::stderr().lock());
        std::process::exit(code);
    }
}
