//! Subcommand handlers. Each returns the process exit code.

use super::commands::{DetectArgs, GenerateArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::FlkrConfig;
use crate::error::DetectionError;
use crate::generator::{DefaultGenerator, GenerateOptions, Generator};
use crate::stack::{AppProfile, DetectContext, DetectorRegistry, LanguageId};
use crate::vendor::go_vendor_hash;
use crate::{NAME, VERSION};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const NO_MATCH: &str = "no application stack detected";

pub async fn handle_detect(args: &DetectArgs, config: &FlkrConfig, format: OutputFormat) -> i32 {
    let path = args.project_dir();
    info!(path = %path.display(), "Detecting application stack");
    let ctx = new_context(config);
    let formatter = OutputFormatter::new(format);

    let rendered = if args.all {
        match run_detection(ctx, path, detect_all).await {
            Ok(candidates) if candidates.is_empty() => return no_match(),
            Ok(candidates) => formatter.format_candidates(&candidates),
            Err(e) => return report_error(&e),
        }
    } else {
        match run_detection(ctx, path, detect_best).await {
            Ok(Some(profile)) => formatter.format_profile(&profile),
            Ok(None) => return no_match(),
            Err(e) => return report_error(&e),
        }
    };

    match rendered {
        Ok(output) => {
            println!("{}", output.trim_end());
            0
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            1
        }
    }
}

pub async fn handle_generate(args: &GenerateArgs, config: &FlkrConfig) -> i32 {
    let path = args.project_dir();
    info!(path = %path.display(), "Generating flake");
    let ctx = new_context(config);

    let mut profile = match run_detection(ctx.clone(), path.clone(), detect_best).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return no_match(),
        Err(e) => return report_error(&e),
    };

    if args.vendor_hash {
        if profile.language == Some(LanguageId::Go) {
            match go_vendor_hash(&path, &ctx).await {
                Ok(hash) => profile.vendor_hash = Some(hash),
                Err(e) => {
                    eprintln!("error: computing vendor hash: {}", e);
                    return 1;
                }
            }
        } else {
            warn!(language = ?profile.language, "--vendor-hash only applies to Go projects, ignoring");
        }
    }

    let options = GenerateOptions {
        output_path: Some(args.output_path()),
        templates_url: config.templates_url.clone(),
        template_version: config.template_version.clone(),
        dry_run: args.dry_run,
    };

    match DefaultGenerator.generate(&profile, &options) {
        Ok(result) => {
            match result.output_path {
                Some(written) => println!("wrote {}", written.display()),
                None => print!("{}", result.flake_content),
            }
            0
        }
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    }
}

pub fn handle_version() -> i32 {
    println!("{} {}", NAME, VERSION);
    0
}

fn new_context(config: &FlkrConfig) -> DetectContext {
    let ctx = match config.detect_timeout() {
        Some(timeout) => DetectContext::with_timeout(timeout),
        None => DetectContext::new(),
    };
    spawn_cancel_on_ctrl_c(ctx.clone());
    ctx
}

/// Cancels `ctx` on the first Ctrl-C.
fn spawn_cancel_on_ctrl_c(ctx: DetectContext) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            ctx.cancel();
        }
    });
}

fn detect_best(ctx: &DetectContext, path: &Path) -> Result<Option<AppProfile>, DetectionError> {
    DetectorRegistry::with_defaults().detect_from_path(ctx, path)
}

fn detect_all(ctx: &DetectContext, path: &Path) -> Result<Vec<AppProfile>, DetectionError> {
    DetectorRegistry::with_defaults().detect_all_from_path(ctx, path)
}

/// Runs a blocking detection pass off the async runtime.
async fn run_detection<T, F>(ctx: DetectContext, path: PathBuf, detect: F) -> Result<T, DetectionError>
where
    T: Send + 'static,
    F: FnOnce(&DetectContext, &Path) -> Result<T, DetectionError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || detect(&ctx, &path)).await;
    match result {
        Ok(result) => result,
        Err(join_err) => {
            debug!(error = %join_err, "Detection task failed");
            Err(DetectionError::Cancelled)
        }
    }
}

fn no_match() -> i32 {
    eprintln!("{}", NO_MATCH);
    1
}

fn report_error(err: &DetectionError) -> i32 {
    eprintln!("error: {}", err);
    1
}
