//! Tenant Console CLI - permission checks and operator management.
//!
//! # Usage
//!
//! ```bash
//! # Can an editor on the admin panel edit plans?
//! tc-cli check --panel admin --role editor plans:edit
//!
//! # Does a vendor agent hold every listed permission?
//! tc-cli check --panel vendor --role agent --mode all cards:view enquiries:view
//!
//! # List roles, optionally from a permissions file
//! tc-cli roles --panel vendor --file permissions.yaml
//!
//! # Validate a permissions file
//! tc-cli validate permissions.yaml
//!
//! # Digest an access key for the operators file
//! echo -n "$KEY" | tc-cli operator digest
//! ```
//!
//! # Exit Status
//!
//! `check` exits 0 when allowed and 2 when denied. Any command exits 1 on
//! error.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use tenant_console_core::Panel;

mod commands;

use commands::CliError;
use commands::check::Mode;

#[derive(Parser)]
#[command(name = "tc-cli")]
#[command(author, version, about = "Tenant Console CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate permissions for a role
    Check {
        /// Panel whose table to use (`admin`, `vendor`)
        #[arg(short, long)]
        panel: Panel,

        /// Role identifier
        #[arg(short, long)]
        role: String,

        /// `can` takes one permission, `any`/`all` take a list
        #[arg(short, long, value_enum, default_value_t = Mode::Can)]
        mode: Mode,

        /// Permissions file (compiled-in tables when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Permissions to check
        permissions: Vec<String>,
    },
    /// List roles and their permissions
    Roles {
        /// Only this panel
        #[arg(short, long)]
        panel: Option<Panel>,

        /// Permissions file (compiled-in tables when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Validate a permissions file
    Validate {
        /// Permissions file
        file: PathBuf,
    },
    /// Manage operators
    Operator {
        #[command(subcommand)]
        action: OperatorAction,
    },
}

#[derive(Subcommand)]
enum OperatorAction {
    /// Print the SHA-256 digest of an access key read from stdin
    Digest,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tc_cli=info,tenant_console=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Check {
            panel,
            role,
            mode,
            file,
            permissions,
        } => {
            let allowed = commands::check::run(
                &mut out,
                panel,
                &role,
                mode,
                file.as_deref(),
                &permissions,
            )?;
            return Ok(if allowed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(commands::check::DENIED_EXIT_CODE)
            });
        }
        Commands::Roles { panel, file } => commands::roles::run(&mut out, panel, file.as_deref())?,
        Commands::Validate { file } => {
            commands::validate::run(&mut out, &file)?;
        }
        Commands::Operator { action } => match action {
            OperatorAction::Digest => {
                commands::operator::digest(std::io::stdin().lock(), &mut out)?;
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}
