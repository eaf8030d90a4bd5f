//! Virtual-environment adapter
//!
//! Creates the Python virtual environment the resolver was told to set up.
//! The owning pipeline step is declared Recoverable.

use camino::Utf8Path;
use tokio::process::Command;
use tracing::info;

use crate::error::{Error, Result};

/// Create a Python virtual environment named `name` under `cwd`
///
/// Tries `python3` first and falls back to `python`; a missing interpreter
/// under both names is `PythonNotFound`.
pub async fn create_virtualenv(cwd: &Utf8Path, name: &str) -> Result<()> {
    for interpreter in ["python3", "python"] {
        let result = Command::new(interpreter)
            .current_dir(cwd)
            .args(["-m", "venv", name])
            .output()
            .await;

        match result {
            Ok(output) if output.status.success() => {
                info!("virtual environment '{}' created at {}", name, cwd);
                return Ok(());
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(Error::subprocess(
                    format!("{interpreter} -m venv"),
                    stderr.trim(),
                ));
            }
            // Interpreter not present under this name; try the next.
            Err(_) => continue,
        }
    }

    Err(Error::PythonNotFound)
}
