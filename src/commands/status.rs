use anyhow::Result;
use lectio::cache::{CACHE_FILE_NAME, PassageCache};
use tracing::{info, warn};

use crate::cli::StatusArgs;

pub fn run(args: StatusArgs) -> Result<()> {
    let db_path = args.cache_root.join(CACHE_FILE_NAME);

    info!(cache_root = %args.cache_root.display(), "status requested");

    if !db_path.exists() {
        warn!(path = %db_path.display(), "passage cache missing");
        return Ok(());
    }

    let cache = PassageCache::open(&db_path)?;
    let passages = cache.count()?;
    info!(
        path = %db_path.display(),
        passages,
        "passage cache status"
    );

    Ok(())
}
