//! Interactive package selection
//!
//! The selector is a seam: the browse flow only needs "packages in,
//! chosen packages out". `FuzzySelector` drives a cliclack multiselect
//! in filter mode; tests use canned selections.

use super::context::UiContext;
use crate::error::{BrewseError, BrewseResult};
use crate::manifest::ManifestIndex;
use crate::registry::Package;
use async_trait::async_trait;
use std::io::ErrorKind;
use tracing::debug;

/// Rows visible at once in the finder
const VISIBLE_ROWS: usize = 15;
const NAME_WIDTH: usize = 32;
const VERSION_WIDTH: usize = 12;
const DESCRIPTION_WIDTH: usize = 60;

/// Lets the user pick packages from the catalog
#[async_trait]
pub trait PackageSelector: Send + Sync {
    /// Return the chosen packages; an empty vector when the user picks
    /// nothing or cancels
    async fn select(
        &self,
        packages: Vec<Package>,
        index: &ManifestIndex,
    ) -> BrewseResult<Vec<Package>>;
}

/// Type-to-filter multiselect over the whole catalog
pub struct FuzzySelector {
    interactive: bool,
}

impl FuzzySelector {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            interactive: ctx.is_interactive(),
        }
    }
}

#[async_trait]
impl PackageSelector for FuzzySelector {
    async fn select(
        &self,
        mut packages: Vec<Package>,
        index: &ManifestIndex,
    ) -> BrewseResult<Vec<Package>> {
        if !self.interactive {
            return Err(BrewseError::User(
                "Package selection needs an interactive terminal".to_string(),
            ));
        }

        sort_for_search(&mut packages);
        let rows: Vec<(usize, String, String)> = packages
            .iter()
            .enumerate()
            .map(|(i, p)| (i, row_label(p, index.contains(p)), row_hint(p)))
            .collect();

        let picked = tokio::task::spawn_blocking(move || {
            let mut prompt = cliclack::multiselect("Search packages (space selects, enter confirms)")
                .filter_mode()
                .required(false)
                .max_rows(VISIBLE_ROWS);
            for (value, label, hint) in rows {
                prompt = prompt.item(value, label, hint);
            }
            prompt.interact()
        })
        .await
        .map_err(|e| BrewseError::User(format!("Selector task failed: {}", e)))?;

        match picked {
            Ok(indices) => {
                debug!("User selected {} packages", indices.len());
                Ok(indices.into_iter().map(|i| packages[i].clone()).collect())
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {
                debug!("Selection cancelled");
                Ok(Vec::new())
            }
            Err(e) => Err(BrewseError::User(format!("Selector failed: {}", e))),
        }
    }
}

/// Shorter identifiers first, then alphabetical; formula/cask ties keep
/// catalog order
pub fn sort_for_search(packages: &mut [Package]) {
    packages.sort_by(|a, b| a.id.len().cmp(&b.id.len()).then_with(|| a.id.cmp(&b.id)));
}

/// `✓ wget (GNU Wget)`, with the mark only for packages already declared
pub fn row_label(package: &Package, in_manifest: bool) -> String {
    let mark = if in_manifest { "✓" } else { " " };
    format!("{} {}", mark, fit(&package.display_name(), NAME_WIDTH))
}

/// `cask │ 3.0.20 │ Multimedia player`
pub fn row_hint(package: &Package) -> String {
    let version = if package.version.is_empty() {
        "unknown"
    } else {
        package.version.as_str()
    };
    let description = if package.description.is_empty() {
        "-"
    } else {
        package.description.as_str()
    };
    format!(
        "{} │ {} │ {}",
        package.kind.keyword(),
        fit(version, VERSION_WIDTH),
        fit(description, DESCRIPTION_WIDTH).trim_end()
    )
}

/// Pad or cut `text` to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{}{}", text, " ".repeat(width - len))
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
