use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Detect application stacks and generate minimal Nix flakes
#[derive(Parser, Debug)]
#[command(
    name = "flkr",
    about = "Detect application stacks and generate minimal Nix flakes",
    version,
    long_about = "flkr inspects a project directory, identifies its language, package manager \
                  and framework from manifest files, and renders a flake.nix that builds it \
                  with the flkr-templates library."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,

    #[arg(long, global = true, help = "Print machine-readable JSON")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        value_name = "SECONDS",
        help = "Detection timeout in seconds, 0 to disable (default: FLKR_DETECT_TIMEOUT or 30)"
    )]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect the application stack of a project",
        long_about = "Runs every ecosystem detector against the project and prints the \
                      highest-confidence match, enriched with environment variables and \
                      Procfile commands.\n\n\
                      Examples:\n  \
                      flkr detect\n  \
                      flkr detect ./my-app --json\n  \
                      flkr detect --all"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Generate flake.nix for a project",
        long_about = "Detects the application stack and renders a flake.nix that delegates \
                      the build to flkr-templates.\n\n\
                      Examples:\n  \
                      flkr generate\n  \
                      flkr generate ./my-app --dry-run\n  \
                      flkr generate --template-version v1.0.0 -o build/flake.nix\n  \
                      flkr generate ./go-service --vendor-hash"
    )]
    Generate(GenerateArgs),

    #[command(about = "Print version information")]
    Version,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(value_name = "PATH", help = "Project directory (defaults to current directory)")]
    pub path: Option<PathBuf>,

    #[arg(long, help = "List every matching candidate instead of the best match")]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(value_name = "PATH", help = "Project directory (defaults to current directory)")]
    pub path: Option<PathBuf>,

    #[arg(long, help = "Print the flake instead of writing it")]
    pub dry_run: bool,

    #[arg(
        long,
        value_name = "VERSION",
        help = "Pin flkr-templates to a tag (default: FLKR_TEMPLATE_VERSION)"
    )]
    pub template_version: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Output file (defaults to <PATH>/flake.nix)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Compute the Go vendorHash with `go mod vendor` and `nix hash path`")]
    pub vendor_hash: bool,
}

impl DetectArgs {
    pub fn project_dir(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

impl GenerateArgs {
    pub fn project_dir(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.project_dir().join("flake.nix"))
    }
}
