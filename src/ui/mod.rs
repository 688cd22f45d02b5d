//! UI module for the interactive package finder and status output
//!
//! Uses `cliclack` for the filterable multiselect, spinners and step logs,
//! with automatic fallback to plain output in CI/non-interactive environments.
//!
//! # Example
//!
//! ```rust,ignore
//! use brewse::ui::{self, FuzzySelector, PackageSelector, TaskSpinner, UiContext};
//!
//! let ctx = UiContext::detect();
//! ui::intro(&ctx, "brewse");
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Fetching Homebrew packages...");
//! let packages = registry.fetch_all().await?;
//! spinner.stop(&format!("Loaded {} packages", packages.len()));
//!
//! let selected = FuzzySelector::new(&ctx).select(packages, &index).await?;
//! ui::outro_success(&ctx, "Done!");
//! ```

mod context;
mod output;
mod progress;
mod selector;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, outro_success, outro_warn, remark, step_error_detail, step_info, step_ok,
    step_warn_hint,
};
pub use progress::TaskSpinner;
pub use selector::{row_hint, row_label, sort_for_search, FuzzySelector, PackageSelector};
pub use theme::{init_theme, BrewseTheme};
