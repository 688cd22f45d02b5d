//! Browse command - search the catalog and act on the selection

use crate::brew::Brew;
use crate::cache::CacheStore;
use crate::cli::args::BrowseArgs;
use crate::config::schema::CacheConfig;
use crate::config::{Config, ConfigManager};
use crate::error::BrewseResult;
use crate::manifest::{Manifest, ManifestIndex};
use crate::registry::{Package, RegistryClient, UreqTransport};
use crate::ui::{self, FuzzySelector, PackageSelector, TaskSpinner, UiContext};
use tracing::{debug, warn};

/// What to do with the selected packages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `brew install` each package directly
    Immediate,
    /// Append to the Brewfile, then optionally `brew bundle`
    Manifest { apply: bool },
}

/// How a browse run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseOutcome {
    NothingSelected,
    AlreadyPresent,
    Installed { installed: usize, failed: usize },
    Added { count: usize, applied: bool },
}

/// Execute the browse command
pub async fn execute(args: BrowseArgs, config: &Config) -> BrewseResult<()> {
    let ctx = UiContext::detect();
    ui::init_theme();

    let home = ConfigManager::home_dir()?;
    let paths = config.resolve(&home);
    let ttl = args
        .ttl_hours
        .map(CacheConfig::ttl_from_hours)
        .unwrap_or_else(|| config.cache.ttl());
    debug!("Cache directory: {}", paths.cache_dir.display());

    let cache = CacheStore::open(&paths.cache_dir, ttl).await?;
    let transport = UreqTransport::new(config.registry.timeout());
    let registry = RegistryClient::new(cache, Box::new(transport), &config.registry)
        .with_refresh(args.refresh);

    let manifest = Manifest::new(args.manifest.unwrap_or(paths.manifest));
    let brew = Brew::new(config.brew.binary.clone());
    let mode = if args.immediate {
        Mode::Immediate
    } else {
        Mode::Manifest {
            apply: !args.no_apply,
        }
    };

    ui::intro(&ctx, "brewse");
    let selector = FuzzySelector::new(&ctx);
    let outcome = browse(&ctx, &registry, &selector, &manifest, &brew, mode).await?;
    report(&ctx, &outcome, &manifest);

    Ok(())
}

/// Load the Brewfile index, fetch the catalog, ask for a selection and act on it
pub async fn browse(
    ctx: &UiContext,
    registry: &RegistryClient,
    selector: &dyn PackageSelector,
    manifest: &Manifest,
    brew: &Brew,
    mode: Mode,
) -> BrewseResult<BrowseOutcome> {
    let index = match manifest.load_existing().await {
        Ok(index) => index,
        Err(e) => {
            warn!("{}", e);
            ui::step_warn_hint(
                ctx,
                &format!("Could not load {}", manifest.path().display()),
                "treating it as empty",
            );
            ManifestIndex::default()
        }
    };

    let mut spinner = TaskSpinner::new(ctx);
    spinner.start("Fetching Homebrew packages...");
    let packages = match registry.fetch_all().await {
        Ok(packages) => packages,
        Err(e) => {
            spinner.stop_error("Failed to fetch packages");
            return Err(e);
        }
    };
    spinner.stop(&format!("Loaded {} packages", packages.len()));

    let selected = selector.select(packages, &index).await?;
    apply_selection(ctx, selected, &index, manifest, brew, mode).await
}

/// Act on a finished selection
///
/// An empty selection returns without touching the Brewfile. In manifest
/// mode packages the index already holds are skipped; write and
/// `brew bundle` failures are returned as errors. In immediate mode a
/// failed install is reported and the remaining packages still install.
pub async fn apply_selection(
    ctx: &UiContext,
    selected: Vec<Package>,
    index: &ManifestIndex,
    manifest: &Manifest,
    brew: &Brew,
    mode: Mode,
) -> BrewseResult<BrowseOutcome> {
    if selected.is_empty() {
        return Ok(BrowseOutcome::NothingSelected);
    }

    match mode {
        Mode::Immediate => Ok(install_all(ctx, &selected, brew).await),
        Mode::Manifest { apply } => {
            let new_packages: Vec<Package> = selected
                .into_iter()
                .filter(|p| !index.contains(p))
                .collect();

            if new_packages.is_empty() {
                return Ok(BrowseOutcome::AlreadyPresent);
            }

            ui::step_info(
                ctx,
                &format!(
                    "Adding {} new packages to {}",
                    new_packages.len(),
                    manifest.path().display()
                ),
            );
            manifest.add_packages(&new_packages).await?;

            if apply {
                ui::step_info(ctx, "Running brew bundle...");
                manifest.run_apply(brew).await?;
            }

            Ok(BrowseOutcome::Added {
                count: new_packages.len(),
                applied: apply,
            })
        }
    }
}

async fn install_all(ctx: &UiContext, packages: &[Package], brew: &Brew) -> BrowseOutcome {
    ui::step_info(
        ctx,
        &format!("Installing {} packages directly...", packages.len()),
    );

    let mut installed = 0;
    let mut failed = 0;
    for package in packages {
        ui::step_info(ctx, &format!("Installing {}...", package.id));
        match brew.install(package).await {
            Ok(()) => {
                installed += 1;
                ui::step_ok(ctx, &format!("Installed {}", package.id));
            }
            Err(e) => {
                failed += 1;
                ui::step_error_detail(
                    ctx,
                    &format!("Failed to install {}", package.id),
                    &e.to_string(),
                );
            }
        }
    }

    BrowseOutcome::Installed { installed, failed }
}

fn report(ctx: &UiContext, outcome: &BrowseOutcome, manifest: &Manifest) {
    match outcome {
        BrowseOutcome::NothingSelected => ui::outro_warn(ctx, "No packages selected"),
        BrowseOutcome::AlreadyPresent => ui::outro_success(
            ctx,
            &format!(
                "All selected packages are already in {}",
                manifest.path().display()
            ),
        ),
        BrowseOutcome::Installed { failed: 0, .. } => ui::outro_success(ctx, "Done!"),
        BrowseOutcome::Installed { installed, failed } => ui::outro_warn(
            ctx,
            &format!("Installed {}, {} failed", installed, failed),
        ),
        BrowseOutcome::Added {
            count,
            applied: false,
        } => ui::outro_success(
            ctx,
            &format!(
                "Added {} packages; run `brew bundle --file {}` to install",
                count,
                manifest.path().display()
            ),
        ),
        BrowseOutcome::Added { .. } => ui::outro_success(ctx, "Done!"),
    }
}
