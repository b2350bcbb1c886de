use clap::{Parser, Subcommand};
use xtask::{FeatureSet, Result, commands};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the msntp workspace and demos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the workspace crates
    Build {
        /// Feature set to build msntp with
        #[arg(long, value_enum, default_value_t = FeatureSet::Default)]
        features: FeatureSet,
    },
    /// Build demo applications (simple-request, timesync)
    BuildDemos,
    /// Build workspace crates in every feature set, then all demos
    BuildAll,
    /// Run workspace tests for every feature set
    Test,
    /// Check all code (workspace crates and demos)
    Check,
    /// Run clippy on all code with strict linting
    Clippy,
    /// Check or fix code formatting for the workspace and demos
    Format {
        /// Fix formatting issues instead of reporting them
        #[arg(long)]
        fix: bool,
    },
    /// Clean all build artifacts
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { features } => commands::build::build_workspace(features),
        Commands::BuildDemos => commands::build::build_demos(),
        Commands::BuildAll => commands::build::build_all(),
        Commands::Test => commands::test::run_tests(),
        Commands::Check => commands::check::check_all(),
        Commands::Clippy => commands::clippy::run_clippy(),
        Commands::Format { fix: true } => commands::format::fix_formatting(),
        Commands::Format { fix: false } => commands::format::check_formatting(),
        Commands::Clean => commands::clean::clean_all(),
    }
}
