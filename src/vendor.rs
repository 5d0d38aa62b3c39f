//! Go `vendorHash` computation.
//!
//! `buildGoModule` needs the hash of the vendored dependency tree. It is
//! produced by vendoring into a scratch directory with `go mod vendor` and
//! hashing the result with `nix hash path`. The scratch directory is a
//! [`tempfile::TempDir`], closed explicitly once the tools have finished and
//! removed on drop if an error or cancellation unwinds first. The module cache
//! inside it is kept writable (`-modcacherw`) so removal cannot be refused.

use crate::error::DetectionError;
use crate::stack::DetectContext;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(50);
const GO_FLAGS: &str = "-mod=mod -modcacherw";

#[derive(Debug, Error)]
pub enum VendorHashError {
    #[error("creating temp dir: {0}")]
    TempDir(#[source] io::Error),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    /// The tool ran and failed; `stderr` is its diagnostic output unmodified.
    #[error("{program} failed ({status}): {stderr}")]
    SubordinateProcess {
        program: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    #[error("removing scratch dir {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("nix hash path returned empty output")]
    EmptyOutput,

    #[error("vendor hash computation cancelled")]
    Cancelled,

    #[error("vendor hash deadline exceeded")]
    DeadlineExceeded,
}

impl From<DetectionError> for VendorHashError {
    fn from(err: DetectionError) -> Self {
        match err {
            DetectionError::DeadlineExceeded => Self::DeadlineExceeded,
            _ => Self::Cancelled,
        }
    }
}

/// SRI hash (`sha256-...`) of the module's vendored dependencies.
pub async fn go_vendor_hash(project_dir: &Path, ctx: &DetectContext) -> Result<String, VendorHashError> {
    ctx.check()?;

    let scratch = tempfile::Builder::new()
        .prefix("flkr-vendor-")
        .tempdir()
        .map_err(VendorHashError::TempDir)?;
    debug!(project = %project_dir.display(), scratch = %scratch.path().display(), "Vendoring Go modules");

    let result = vendor_and_hash(project_dir, scratch.path(), ctx).await;
    match (result, remove_scratch(scratch)) {
        (Ok(hash), Ok(())) => Ok(hash),
        (Ok(_), Err(cleanup)) => Err(cleanup),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(cleanup)) => {
            warn!(error = %cleanup, "Scratch dir left behind");
            Err(err)
        }
    }
}

async fn vendor_and_hash(
    project_dir: &Path,
    scratch: &Path,
    ctx: &DetectContext,
) -> Result<String, VendorHashError> {
    let vendor_dir = scratch.join("vendor");
    run("go mod vendor", &mut go_mod_vendor(project_dir, scratch), ctx).await?;

    let mut nix = Command::new("nix");
    nix.args(["hash", "path"]).arg(&vendor_dir);
    let stdout = run("nix hash path", &mut nix, ctx).await?;

    let hash = String::from_utf8_lossy(&stdout).trim().to_string();
    if hash.is_empty() {
        return Err(VendorHashError::EmptyOutput);
    }
    debug!(%hash, "Computed vendor hash");
    Ok(hash)
}

/// `go mod vendor` with every Go cache redirected into `scratch`.
fn go_mod_vendor(project_dir: &Path, scratch: &Path) -> Command {
    let mut go = Command::new("go");
    go.args(["mod", "vendor", "-o"])
        .arg(scratch.join("vendor"))
        .current_dir(project_dir)
        .env("GOFLAGS", GO_FLAGS)
        .env("GOPATH", scratch.join("gopath"))
        .env("GOMODCACHE", scratch.join("gomodcache"));
    go
}

fn remove_scratch(scratch: TempDir) -> Result<(), VendorHashError> {
    let path = scratch.path().to_path_buf();
    scratch
        .close()
        .map_err(|source| VendorHashError::Cleanup { path, source })
}

/// Runs `command` to completion and returns its stdout. The child is killed if
/// the context is cancelled or its deadline passes first.
async fn run(
    program: &'static str,
    command: &mut Command,
    ctx: &DetectContext,
) -> Result<Vec<u8>, VendorHashError> {
    let child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| VendorHashError::Spawn { program, source })?;

    let output = tokio::select! {
        output = child.wait_with_output() => {
            output.map_err(|source| VendorHashError::Spawn { program, source })?
        }
        err = interrupted(ctx) => return Err(err),
    };

    if !output.status.success() {
        return Err(VendorHashError::SubordinateProcess {
            program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(output.stdout)
}

async fn interrupted(ctx: &DetectContext) -> VendorHashError {
    loop {
        if let Err(err) = ctx.check() {
            return err.into();
        }
        tokio::time::sleep(CANCEL_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let ctx = DetectContext::new();
        ctx.cancel();
        let err = go_vendor_hash(Path::new("."), &ctx).await.unwrap_err();
        assert!(matches!(err, VendorHashError::Cancelled));
    }

    #[test]
    fn test_go_mod_vendor_keeps_caches_in_scratch() {
        let scratch = Path::new("/tmp/flkr-vendor-test");
        let go = go_mod_vendor(Path::new("/src/app"), scratch);
        let envs: Vec<_> = go.as_std().get_envs().collect();

        let env = |key: &str| {
            envs.iter()
                .find(|(k, _)| *k == key)
                .and_then(|(_, v)| *v)
                .map(|v| v.to_string_lossy().into_owned())
        };
        let flags = env("GOFLAGS").unwrap();
        assert!(flags.split_whitespace().any(|f| f == "-modcacherw"));
        assert!(flags.split_whitespace().any(|f| f == "-mod=mod"));
        assert_eq!(env("GOMODCACHE").unwrap(), "/tmp/flkr-vendor-test/gomodcache");
        assert_eq!(env("GOPATH").unwrap(), "/tmp/flkr-vendor-test/gopath");
        assert_eq!(go.as_std().get_current_dir(), Some(Path::new("/src/app")));
    }

    #[test]
    fn test_remove_scratch_deletes_tree() {
        let scratch = tempfile::tempdir().unwrap();
        let path = scratch.path().to_path_buf();
        std::fs::create_dir_all(path.join("gomodcache/example.com/x@v1.0.0")).unwrap();
        std::fs::write(path.join("gomodcache/example.com/x@v1.0.0/go.mod"), "module x\n").unwrap();

        remove_scratch(scratch).unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_missing_program() {
        let mut cmd = Command::new("flkr-test-no-such-program");
        let err = run("flkr-test-no-such-program", &mut cmd, &DetectContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, VendorHashError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_stderr_is_passed_through_verbatim() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "printf 'go: module not found\\n  detail\\n' >&2; exit 3"]);
        let err = run("sh", &mut cmd, &DetectContext::new()).await.unwrap_err();

        match err {
            VendorHashError::SubordinateProcess { status, stderr, .. } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "go: module not found\n  detail\n");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_stdout_returned_on_success() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo sha256-abc="]);
        let out = run("sh", &mut cmd, &DetectContext::new()).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&out).trim(), "sha256-abc=");
    }

    #[tokio::test]
    async fn test_deadline_kills_long_running_process() {
        let ctx = DetectContext::with_timeout(Duration::from_millis(100));
        let mut cmd = Command::new("sleep");
        cmd.arg("10");

        let started = std::time::Instant::now();
        let err = run("sleep", &mut cmd, &ctx).await.unwrap_err();

        assert!(matches!(err, VendorHashError::DeadlineExceeded));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
