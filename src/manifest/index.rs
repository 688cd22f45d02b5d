//! Brewfile membership index

use crate::registry::{Package, PackageKind};
use std::collections::{BTreeSet, HashSet};

/// Declarations found in a Brewfile, tracked per declaration keyword
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestIndex {
    brews: HashSet<String>,
    casks: HashSet<String>,
    taps: HashSet<String>,
}

/// One recognised Brewfile statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Brew(String),
    Cask(String),
    Tap(String),
}

impl ManifestIndex {
    /// Build an index from Brewfile text
    pub fn parse(content: &str) -> Self {
        let mut index = Self::default();
        for declaration in content.lines().filter_map(parse_line) {
            index.insert(declaration);
        }
        index
    }

    fn insert(&mut self, declaration: Declaration) {
        match declaration {
            Declaration::Brew(id) => self.brews.insert(id),
            Declaration::Cask(id) => self.casks.insert(id),
            Declaration::Tap(id) => self.taps.insert(id),
        };
    }

    /// Whether the package is declared with the keyword for its kind
    pub fn contains(&self, package: &Package) -> bool {
        match package.kind {
            PackageKind::Formula => self.brews.contains(&package.id),
            PackageKind::Cask => self.casks.contains(&package.id),
        }
    }

    /// Every declared identifier, across brews, casks and taps
    pub fn identifiers(&self) -> BTreeSet<&str> {
        self.brews
            .iter()
            .chain(&self.casks)
            .chain(&self.taps)
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.brews.len() + self.casks.len() + self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a single Brewfile line
///
/// Recognises `brew`, `cask` and `tap` statements and takes the second
/// whitespace-separated token as the identifier, without quotes or a
/// trailing option comma. Blank lines, comments, other statements and
/// statements without an identifier yield `None`.
pub fn parse_line(line: &str) -> Option<Declaration> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut tokens = line.split_whitespace();
    let keyword = tokens.next()?;
    let id = tokens
        .next()?
        .trim_end_matches(',')
        .trim_matches(|c| c == '"' || c == '\'');
    if id.is_empty() {
        return None;
    }

    let id = id.to_string();
    match keyword {
        "brew" => Some(Declaration::Brew(id)),
        "cask" => Some(Declaration::Cask(id)),
        "tap" => Some(Declaration::Tap(id)),
        _ => None,
    }
}
