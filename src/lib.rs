//! brewse - Interactive Homebrew package browser
//!
//! Fetches the formula and cask catalogs from the Homebrew API (with an
//! on-disk response cache), lets the user fuzzy-pick packages, and either
//! appends them to a Brewfile or installs them directly.

pub mod brew;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod ui;

pub use error::{BrewseError, BrewseResult};
