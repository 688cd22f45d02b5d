//! Cache command - manage cached registry responses

use crate::cache::CacheStore;
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::{Config, ConfigManager};
use crate::error::BrewseResult;
use crate::ui::{self, UiContext};
use tracing::debug;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> BrewseResult<()> {
    let home = ConfigManager::home_dir()?;
    let store = CacheStore::new(config.resolve(&home).cache_dir, config.cache.ttl());

    match args.action {
        CacheAction::Clear => clear(&store).await,
        CacheAction::Path => {
            println!("{}", store.dir().display());
            Ok(())
        }
    }
}

async fn clear(store: &CacheStore) -> BrewseResult<()> {
    let ctx = UiContext::detect();
    debug!("Clearing cache in {}", store.dir().display());

    let removed = store.clear().await?;
    if removed == 0 {
        ui::remark(&ctx, "Cache is already empty");
    } else {
        ui::step_ok(&ctx, &format!("Removed {} cached responses", removed));
    }

    Ok(())
}
