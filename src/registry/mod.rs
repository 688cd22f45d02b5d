//! Homebrew registry access
//!
//! Fetches the formulae and casks collections from the JSON API,
//! normalizes both into `Package` records, and caches raw responses
//! through `CacheStore`.

mod client;
mod package;
mod raw;
mod transport;

pub use client::{RegistryClient, CASKS, FORMULAE};
pub use package::{Package, PackageKind};
pub use raw::{RawCask, RawFormula, RawVersions};
pub use transport::{Transport, UreqTransport};

#[cfg(test)]
pub(crate) use package::{cask, formula};
#[cfg(test)]
pub(crate) use transport::StaticTransport;
