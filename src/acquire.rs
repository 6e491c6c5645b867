use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::FplError;
use crate::form_rankings::derive;
use crate::model::{Rankings, Snapshot};
use crate::snapshot_cache::SnapshotCache;
use crate::snapshot_fetch::{SnapshotFetcher, WriteThrough};
use crate::snapshot_merge::merge;

/// Today's snapshot, from the cache when it is fresh, otherwise from the API.
pub async fn load_snapshot(config: &Config) -> Result<(Snapshot, WriteThrough), FplError> {
    let cache = SnapshotCache::open_today(&config.cache_dir)?;
    if cache.has_fresh_snapshot()? {
        debug!(dir = %cache.dir().display(), date = %cache.date(), "using cached snapshot");
        let snapshot = merge(&cache.read_snapshot()?)?;
        return Ok((snapshot, WriteThrough::default()));
    }

    info!(date = %cache.date(), "no fresh snapshot cached, fetching");
    let fetched = SnapshotFetcher::new(config)?.fetch(Some(&cache)).await?;
    match merge(&fetched.raw) {
        Ok(snapshot) => Ok((snapshot, fetched.write_through)),
        Err(errors) => {
            // The bodies were cached before decoding; drop them or they
            // would be read back as today's snapshot.
            fetched.write_through.settle().await;
            match cache.discard() {
                Ok(removed) => debug!(removed, "discarded undecodable snapshot"),
                Err(err) => warn!("could not discard undecodable snapshot: {err}"),
            }
            Err(errors.into())
        }
    }
}

pub async fn current_rankings(config: &Config) -> Result<Rankings, FplError> {
    let (snapshot, write_through) = load_snapshot(config).await?;
    debug!(
        players = snapshot.players.len(),
        fixtures = snapshot.fixtures.len(),
        round = snapshot.current_round,
        "merged snapshot"
    );
    let rankings = derive(snapshot);
    write_through.settle().await;
    Ok(rankings)
}
