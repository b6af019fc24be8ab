//! External documentation lookup through the `fan` launcher.
//!
//! The lookup is tied to a cancellation token: dropping out of the select
//! kills the child process, so an abandoned hover request cannot leave a
//! subprocess running.

use fanls_core::config::fan_executable;
use fanls_core::error::FanlsError;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Whether `home` actually carries a `fan` launcher. Callers skip the
/// external lookup entirely when it is absent, falling back to source
/// comments instead of surfacing a spawn failure.
pub fn launcher_exists(home: &Path) -> bool {
    fan_executable(home).is_file()
}

pub async fn lookup(
    home: &Path,
    symbol: &str,
    cancel: &CancellationToken,
) -> Result<String, FanlsError> {
    let exe = fan_executable(home);
    let child = tokio::process::Command::new(&exe)
        .arg("docLookup")
        .arg(symbol)
        .kill_on_drop(true)
        .output();

    let output = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            return Err(FanlsError::DocLookup(format!(
                "lookup for '{symbol}' was cancelled"
            )));
        }
        result = child => result.map_err(|e| {
            FanlsError::DocLookup(format!("could not run {}: {e}", exe.display()))
        })?,
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() || !stderr.trim().is_empty() {
        return Err(FanlsError::DocLookup(format!(
            "fan docLookup {symbol} failed: {}",
            if stderr.trim().is_empty() {
                output.status.to_string()
            } else {
                stderr.trim().to_string()
            }
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        Err(FanlsError::DocLookup(format!(
            "no documentation printed for '{symbol}'"
        )))
    } else {
        Ok(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn fake_home(script: &str) -> tempfile::TempDir {
        use std::os::unix::fs::PermissionsExt;

        let home = tempfile::tempdir().expect("tempdir");
        let bin = home.path().join("bin");
        fs::create_dir_all(&bin).expect("bin dir");
        let fan = bin.join("fan");
        fs::write(&fan, script).expect("write script");
        fs::set_permissions(&fan, fs::Permissions::from_mode(0o755)).expect("chmod");
        home
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_lookup_returns_stdout() {
        let home = fake_home("#!/bin/sh\necho \"docs for $2\"\n");
        let cancel = CancellationToken::new();
        let text = lookup(home.path(), "Str", &cancel).await.expect("lookup");
        assert_eq!(text, "docs for Str");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stderr_output_is_a_failure() {
        let home = fake_home("#!/bin/sh\necho \"boom\" >&2\n");
        let cancel = CancellationToken::new();
        let err = lookup(home.path(), "Str", &cancel).await.expect_err("fails");
        assert!(err.to_string().contains("boom"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_a_failure() {
        let home = fake_home("#!/bin/sh\nexit 3\n");
        let cancel = CancellationToken::new();
        assert!(lookup(home.path(), "Str", &cancel).await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn cancellation_wins_over_a_slow_child() {
        let home = fake_home("#!/bin/sh\nsleep 5\n");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = lookup(home.path(), "Str", &cancel).await.expect_err("cancelled");
        assert!(err.to_string().contains("cancelled"));
    }

    #[tokio::test]
    async fn missing_executable_is_an_error_not_a_panic() {
        let home = tempfile::tempdir().expect("tempdir");
        let cancel = CancellationToken::new();
        assert!(lookup(home.path(), "Str", &cancel).await.is_err());
    }

    #[test]
    fn launcher_detection() {
        let bare = tempfile::tempdir().expect("tempdir");
        assert!(!launcher_exists(bare.path()));

        #[cfg(unix)]
        {
            let home = fake_home("#!/bin/sh\n");
            assert!(launcher_exists(home.path()));
        }
    }
}
