//! Unified package record for formulae and casks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of install target a package is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Command-line package (`brew "<id>"`)
    Formula,
    /// GUI application (`cask "<id>"`)
    Cask,
}

impl PackageKind {
    /// Brewfile declaration keyword for this kind
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Formula => "brew",
            Self::Cask => "cask",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formula => write!(f, "formula"),
            Self::Cask => write!(f, "cask"),
        }
    }
}

/// A package as offered by the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    /// Stable key used in the Brewfile and install commands
    pub id: String,
    pub full_name: String,
    pub description: String,
    pub homepage: String,
    pub version: String,
    pub kind: PackageKind,
}

impl Package {
    /// `id (full name)` when the full name adds information, else `id`
    pub fn display_name(&self) -> String {
        if self.full_name.is_empty() || self.full_name == self.id {
            self.id.clone()
        } else {
            format!("{} ({})", self.id, self.full_name)
        }
    }

    /// Arguments for `brew install`
    pub fn install_args(&self) -> Vec<&str> {
        match self.kind {
            PackageKind::Formula => vec!["install", &self.id],
            PackageKind::Cask => vec!["install", "--cask", &self.id],
        }
    }
}

#[cfg(test)]
pub(crate) fn formula(id: &str, description: &str) -> Package {
    Package {
        id: id.to_string(),
        full_name: id.to_string(),
        description: description.to_string(),
        homepage: String::new(),
        version: "1.0".to_string(),
        kind: PackageKind::Formula,
    }
}

#[cfg(test)]
pub(crate) fn cask(id: &str, description: &str) -> Package {
    Package {
        kind: PackageKind::Cask,
        full_name: String::new(),
        ..formula(id, description)
    }
}
