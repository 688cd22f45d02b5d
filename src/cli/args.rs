//! CLI argument definitions using clap derive

use crate::error::{BrewseError, BrewseResult};
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// brewse - Interactive Homebrew package browser
///
/// Fuzzy-search every Homebrew formula and cask, pick the ones you want,
/// and add them to your Brewfile (or install them right away).
#[derive(Parser, Debug)]
#[command(name = "brewse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to browse)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub browse: BrowseArgs,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BREWSE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Reject browse flags given in front of a subcommand other than browse
    pub fn check_browse_flags(&self) -> BrewseResult<()> {
        if self.browse.is_unset() || matches!(self.command, None | Some(Commands::Browse(_))) {
            return Ok(());
        }
        Err(BrewseError::User(
            "Browse flags can only be used with the browse command".to_string(),
        ))
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search packages and add the selection to the Brewfile
    Browse(BrowseArgs),

    /// Manage the registry response cache
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the browse command
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
pub struct BrowseArgs {
    /// Install selected packages now instead of updating the Brewfile
    #[arg(short, long)]
    pub immediate: bool,

    /// Ignore cached registry responses and fetch fresh ones
    #[arg(short, long)]
    pub refresh: bool,

    /// Brewfile to update (default: ~/Brewfile)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Hours before cached registry responses expire
    #[arg(long)]
    pub ttl_hours: Option<u64>,

    /// Update the Brewfile without running `brew bundle`
    #[arg(long, conflicts_with = "immediate")]
    pub no_apply: bool,
}

impl BrowseArgs {
    /// Combine flags given before `browse` with the subcommand's own
    ///
    /// Switches are OR-ed and the subcommand's values win. The merged set
    /// is rechecked because clap only validates each level on its own.
    pub fn merge(self, sub: BrowseArgs) -> BrewseResult<BrowseArgs> {
        let merged = BrowseArgs {
            immediate: self.immediate || sub.immediate,
            refresh: self.refresh || sub.refresh,
            manifest: sub.manifest.or(self.manifest),
            ttl_hours: sub.ttl_hours.or(self.ttl_hours),
            no_apply: self.no_apply || sub.no_apply,
        };
        if merged.immediate && merged.no_apply {
            return Err(BrewseError::User(
                "--immediate cannot be used with --no-apply".to_string(),
            ));
        }
        Ok(merged)
    }

    /// Whether no browse flag was given
    pub fn is_unset(&self) -> bool {
        *self == BrowseArgs::default()
    }
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Remove all cached registry responses
    Clear,

    /// Show the cache directory
    Path,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}
