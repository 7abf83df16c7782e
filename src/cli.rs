use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

use crate::constants::{exit_codes, verbosity};
use crate::project::{Database, HttpAdapter, Variant};

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Command-line arguments for kiln.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Args {
    /// Directory where the new project will be created
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Application name, derived from the path when omitted
    #[arg(long)]
    pub app: Option<String>,

    /// Base module name, derived from the application name when omitted
    #[arg(long)]
    pub module: Option<String>,

    /// Database adapter
    #[arg(long, value_enum, default_value_t = Database::Postgres)]
    pub database: Database,

    /// HTTP server adapter
    #[arg(long, value_enum, default_value_t = HttpAdapter::Bandit)]
    pub adapter: HttpAdapter,

    /// Use binary ids for database primary keys
    #[arg(long)]
    pub binary_id: bool,

    /// Increase logging verbosity (`--verbose --verbose` for debug output)
    #[arg(long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Fetch and install dependencies without asking
    #[arg(long, overrides_with = "no_install")]
    pub install: bool,

    /// Skip dependency installation
    #[arg(long)]
    pub no_install: bool,

    /// Generate Ecto files (on by default)
    #[arg(long, overrides_with = "no_ecto")]
    pub ecto: bool,

    /// Skip Ecto and database files
    #[arg(long)]
    pub no_ecto: bool,

    /// Generate HTML views (on by default)
    #[arg(long, overrides_with = "no_html")]
    pub html: bool,

    /// Skip HTML views
    #[arg(long)]
    pub no_html: bool,

    /// Generate gettext files (on by default)
    #[arg(long, overrides_with = "no_gettext")]
    pub gettext: bool,

    /// Skip gettext files
    #[arg(long)]
    pub no_gettext: bool,

    /// Generate mailer files (on by default)
    #[arg(long, overrides_with = "no_mailer")]
    pub mailer: bool,

    /// Skip mailer files
    #[arg(long)]
    pub no_mailer: bool,

    /// Generate asset-builder setup (on by default, requires html)
    #[arg(long, overrides_with = "no_assets")]
    pub assets: bool,

    /// Skip asset-builder setup
    #[arg(long)]
    pub no_assets: bool,

    /// Generate an umbrella project with core and web child applications
    #[arg(long, conflicts_with_all = ["web_only", "ecto_only"])]
    pub umbrella: bool,

    /// Generate only the web application, for an existing umbrella
    #[arg(long, conflicts_with = "ecto_only")]
    pub web_only: bool,

    /// Generate only the core application with Ecto, no web layer
    #[arg(long)]
    pub ecto_only: bool,

    /// Print the version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),
}

impl Args {
    pub fn variant(&self) -> Variant {
        if self.umbrella {
            Variant::Umbrella
        } else if self.web_only {
            Variant::Web
        } else if self.ecto_only {
            Variant::Ecto
        } else {
            Variant::App
        }
    }

    /// The explicit install decision, or `None` when the user should be
    /// prompted.
    pub fn install_decision(&self) -> Option<bool> {
        if self.no_install {
            Some(false)
        } else if self.install {
            Some(true)
        } else {
            None
        }
    }
}

/// Parse command line arguments with custom handling for missing required
/// inputs: a bare `kiln` prints the help listing instead of an error.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `--verbose` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
