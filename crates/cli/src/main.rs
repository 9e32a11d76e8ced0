mod skill_commands;

use std::process::ExitCode;

use {
    clap::{Parser, Subcommand},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "skillkit",
    version,
    about = "Scaffold, validate, and package skill directories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, env = "SKILLKIT_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new skill directory from the starter template.
    Init {
        /// Skill name (kebab-case, also used as the directory name).
        skill_name: String,
        /// Directory the skill folder is created in.
        #[arg(long)]
        path: std::path::PathBuf,
    },
    /// Check a skill directory and list every problem found.
    Validate {
        /// Path to the skill folder.
        skill_dir: std::path::PathBuf,
        /// Output the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate a skill directory and archive it as `<name>.skill`.
    Package {
        /// Path to the skill folder.
        skill_dir: std::path::PathBuf,
        /// Directory to write the archive to (defaults to the current directory).
        output_dir: Option<std::path::PathBuf>,
    },
}

/// Initialise tracing. Logs go to stderr so command output on stdout stays
/// clean for scripts.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "skillkit starting");

    let result = match cli.command {
        Commands::Init { skill_name, path } => skill_commands::handle_init(&skill_name, &path),
        Commands::Validate { skill_dir, json } => skill_commands::handle_validate(&skill_dir, json),
        Commands::Package {
            skill_dir,
            output_dir,
        } => skill_commands::handle_package(&skill_dir, output_dir.as_deref()),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            println!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}
