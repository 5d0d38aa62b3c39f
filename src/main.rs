use flkr::cli::commands::{CliArgs, Commands};
use flkr::cli::handlers::{handle_detect, handle_generate, handle_version};
use flkr::cli::output::OutputFormat;
use flkr::config::FlkrConfig;
use flkr::util::logging::{self, LoggingConfig};
use flkr::{NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    logging::init_logging(logging_config(&args));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    debug!(?config, "Loaded configuration");

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => {
            handle_detect(detect_args, &config, OutputFormat::from_json_flag(args.json)).await
        }
        Commands::Generate(generate_args) => handle_generate(generate_args, &config).await,
        Commands::Version => handle_version(),
    };

    process::exit(exit_code);
}

/// `--log-level` wins over `-v`/`-q`, which win over `FLKR_LOG_LEVEL`.
fn logging_config(args: &CliArgs) -> LoggingConfig {
    let from_env = logging::config_from_env();
    if let Some(level) = &args.log_level {
        LoggingConfig {
            level: logging::parse_level(level),
            ..from_env
        }
    } else if args.verbose {
        LoggingConfig {
            use_json: from_env.use_json,
            ..LoggingConfig::development()
        }
    } else if args.quiet {
        LoggingConfig {
            level: Level::ERROR,
            ..from_env
        }
    } else {
        from_env
    }
}

/// Environment first, then command-line overrides, validated together.
fn load_config(args: &CliArgs) -> Result<FlkrConfig, flkr::ConfigError> {
    let template_version = match &args.command {
        Commands::Generate(generate_args) => generate_args.template_version.clone(),
        _ => None,
    };
    FlkrConfig::from_env()?.with_overrides(args.timeout, template_version)
}
