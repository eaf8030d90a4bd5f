//! Dependency-install adapter
//!
//! Detects dependency manifests in the scaffolded project and runs the
//! matching installer. Invoked only when the run was started with an
//! explicit install flag.

use camino::Utf8Path;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Detect and install project dependencies in `cwd`
pub async fn install_dependencies(cwd: &Utf8Path) -> Result<()> {
    let mut ran = false;

    if cwd.join("package.json").exists() {
        run_installer(cwd, "npm", &["install"]).await?;
        ran = true;
    }

    if cwd.join("requirements.txt").exists() {
        run_installer(cwd, "pip3", &["install", "-r", "requirements.txt"]).await?;
        ran = true;
    }

    if !ran {
        info!("no dependency manifests detected in {}", cwd);
    }

    Ok(())
}

async fn run_installer(cwd: &Utf8Path, program: &str, args: &[&str]) -> Result<()> {
    debug!("running {} {} in {}", program, args.join(" "), cwd);

    let output = Command::new(program)
        .current_dir(cwd)
        .args(args)
        .output()
        .await
        .map_err(|_| Error::install(format!("{program} not found in PATH")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::install(format!(
            "{program} exited unsuccessfully: {}",
            stderr.trim()
        )));
    }

    Ok(())
}
