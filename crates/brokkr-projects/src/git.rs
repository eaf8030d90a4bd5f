//! Version-control adapter
//!
//! Shells out to the git CLI. The owning pipeline step is declared
//! Recoverable: failures surfaced here are logged by the driver and never
//! abort the scaffold.

use camino::Utf8Path;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Commit message for the scaffold's first commit
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit made by Brokkr";

/// Initialize the repository, stage everything, and create the first commit
pub async fn setup(path: &Utf8Path) -> Result<()> {
    check_git_available().await?;
    init_repository(path).await?;
    ensure_identity(path).await?;
    stage_all(path).await?;
    commit(path, INITIAL_COMMIT_MESSAGE).await?;

    info!("git repository initialized at {}", path);
    Ok(())
}

/// Check if git is available in PATH
pub async fn check_git_available() -> Result<()> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(|_| Error::GitNotFound)?;

    if !output.status.success() {
        return Err(Error::GitNotFound);
    }

    Ok(())
}

/// Initialize a new git repository
pub async fn init_repository(path: &Utf8Path) -> Result<()> {
    if path.join(".git").exists() {
        debug!("git repository already exists at: {}", path);
        return Ok(());
    }

    let output = Command::new("git")
        .current_dir(path)
        .args(["init", "--initial-branch", "main"])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::subprocess("git init", stderr.trim()));
    }

    Ok(())
}

/// Stage all changes
pub async fn stage_all(path: &Utf8Path) -> Result<()> {
    let output = Command::new("git")
        .current_dir(path)
        .args(["add", "."])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::subprocess("git add", stderr.trim()));
    }

    Ok(())
}

/// Create a commit
pub async fn commit(path: &Utf8Path, message: &str) -> Result<()> {
    let output = Command::new("git")
        .current_dir(path)
        .args(["commit", "-m", message])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::subprocess("git commit", stderr.trim()));
    }

    Ok(())
}

/// Configure a repository-local identity when none is available
///
/// Fresh machines and CI containers often have no global git user; the first
/// commit would fail without one.
async fn ensure_identity(path: &Utf8Path) -> Result<()> {
    let user_name = Command::new("git")
        .current_dir(path)
        .args(["config", "user.name"])
        .output()
        .await?;

    if user_name.stdout.is_empty() {
        let _ = Command::new("git")
            .current_dir(path)
            .args(["config", "user.name", "Brokkr"])
            .output()
            .await;
    }

    let user_email = Command::new("git")
        .current_dir(path)
        .args(["config", "user.email"])
        .output()
        .await?;

    if user_email.stdout.is_empty() {
        let _ = Command::new("git")
            .current_dir(path)
            .args(["config", "user.email", "brokkr@localhost"])
            .output()
            .await;
    }

    Ok(())
}
