//! Homebrew process invocation
//!
//! Runs `brew bundle` and `brew install` with the controlling terminal's
//! stdin, stdout and stderr so the user sees Homebrew's own output.

use crate::error::{BrewseError, BrewseResult};
use crate::registry::Package;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Handle on the Homebrew executable
#[derive(Debug, Clone)]
pub struct Brew {
    binary: String,
}

impl Brew {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// `brew bundle --file <manifest>`
    pub async fn bundle(&self, manifest: &Path) -> BrewseResult<()> {
        let manifest = manifest.to_string_lossy();
        self.exec_interactive(&["bundle", "--file", &manifest]).await
    }

    /// `brew install [--cask] <id>`
    pub async fn install(&self, package: &Package) -> BrewseResult<()> {
        self.exec_interactive(&package.install_args()).await
    }

    /// Execute a brew command attached to the terminal
    async fn exec_interactive(&self, args: &[&str]) -> BrewseResult<()> {
        let command = format!("{} {}", self.binary, args.join(" "));
        debug!("Executing interactively: {}", command);

        let status = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| BrewseError::command_failed(&command, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(BrewseError::Apply {
                command,
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

impl Default for Brew {
    fn default() -> Self {
        Self::new("brew")
    }
}
