//! Brewfile management
//!
//! Reads the set of packages a Brewfile already declares, appends newly
//! selected packages as a timestamped block, and hands the file to
//! `brew bundle`.
//!
//! Appending never rewrites or deduplicates existing content. Callers
//! filter with `ManifestIndex::contains` before calling `add_packages`.

mod index;

pub use index::{parse_line, Declaration, ManifestIndex};

use crate::brew::Brew;
use crate::error::{BrewseError, BrewseResult};
use crate::registry::Package;
use chrono::{DateTime, Local};
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, info};

/// Descriptions longer than this are cut in the inline comment
const DESCRIPTION_LIMIT: usize = 60;

/// A Brewfile on disk
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
}

impl Manifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index the declarations currently in the file
    ///
    /// A missing file is an empty index.
    pub async fn load_existing(&self) -> BrewseResult<ManifestIndex> {
        match fs::read(&self.path).await {
            Ok(bytes) => {
                // Hand-edited Brewfiles may carry non-UTF-8 comments
                let index = ManifestIndex::parse(&String::from_utf8_lossy(&bytes));
                debug!(
                    "Loaded {} declarations from {}",
                    index.len(),
                    self.path.display()
                );
                Ok(index)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No manifest at {}", self.path.display());
                Ok(ManifestIndex::default())
            }
            Err(e) => Err(BrewseError::ManifestRead {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Append a block declaring `packages`
    ///
    /// Creates the file and its parent directories when needed. Existing
    /// content is separated from the new block by one blank line.
    pub async fn add_packages(&self, packages: &[Package]) -> BrewseResult<()> {
        self.append_block(packages, Local::now())
            .await
            .map_err(|e| BrewseError::ManifestWrite {
                path: self.path.clone(),
                source: e,
            })?;

        info!(
            "Added {} packages to {}",
            packages.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn append_block(
        &self,
        packages: &[Package],
        added_at: DateTime<Local>,
    ) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;

        let mut out = String::new();
        if file.metadata().await?.len() > 0 {
            file.seek(SeekFrom::End(-1)).await?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last).await?;
            if last[0] != b'\n' {
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str(&render_block(packages, added_at));

        file.write_all(out.as_bytes()).await?;
        file.flush().await
    }

    /// Run `brew bundle` against this file
    pub async fn run_apply(&self, brew: &Brew) -> BrewseResult<()> {
        brew.bundle(&self.path).await
    }
}

/// Header comment plus one declaration line per package
pub fn render_block(packages: &[Package], added_at: DateTime<Local>) -> String {
    let mut block = format!(
        "# Added by brewse on {}\n",
        added_at.format("%Y-%m-%d %H:%M:%S")
    );
    for package in packages {
        block.push_str(&declaration_line(package));
        block.push('\n');
    }
    block
}

/// `brew "<id>"` or `cask "<id>"`, with the description as a trailing comment
pub fn declaration_line(package: &Package) -> String {
    let mut line = format!("{} \"{}\"", package.kind.keyword(), package.id);
    if !package.description.is_empty() {
        line.push_str(" # ");
        line.push_str(&truncate(&package.description, DESCRIPTION_LIMIT));
    }
    line
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{}...", cut)
    }
}
