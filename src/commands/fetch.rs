use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use lectio::cache::{CACHE_FILE_NAME, PassageCache};
use lectio::clean_reference;
use lectio::passage::{HttpPassageSource, PassageSource};
use serde::Serialize;
use tracing::info;

use crate::cli::FetchArgs;

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
struct FetchedPassage {
    reference: String,
    body: String,
    from_cache: bool,
}

pub fn run(args: FetchArgs) -> Result<()> {
    let source = HttpPassageSource::new(&args.endpoint, Duration::from_millis(args.timeout_ms))
        .context("failed to build passage client")?;

    let cache = if args.no_cache {
        None
    } else {
        Some(PassageCache::open(&args.cache_root.join(CACHE_FILE_NAME))?)
    };

    info!(
        endpoint = %args.endpoint,
        cache_root = %args.cache_root.display(),
        cache_enabled = cache.is_some(),
        refresh = args.refresh,
        "fetching passages"
    );

    let mut passages = Vec::with_capacity(args.references.len());
    for input in &args.references {
        let reference = clean_reference(input)
            .with_context(|| format!("failed to normalize `{input}`"))?;
        passages.push(load_passage(&source, cache.as_ref(), &reference, args.refresh)?);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &passages)
            .context("failed to serialize fetch json output")?;
        writeln!(output)?;
    } else {
        for passage in &passages {
            writeln!(output, "{}", passage.reference)?;
            writeln!(output, "{}", passage.body.trim_end())?;
        }
    }
    output.flush()?;
    Ok(())
}

fn load_passage(
    source: &dyn PassageSource,
    cache: Option<&PassageCache>,
    reference: &str,
    refresh: bool,
) -> Result<FetchedPassage> {
    if let Some(cache) = cache.filter(|_| !refresh) {
        if let Some(cached) = cache.get(reference)? {
            info!(reference, fetched_at = %cached.fetched_at, "passage served from cache");
            return Ok(FetchedPassage {
                reference: cached.reference,
                body: cached.body,
                from_cache: true,
            });
        }
    }

    let body = source
        .fetch(reference)
        .with_context(|| format!("failed to fetch passage for {reference}"))?;
    info!(reference, bytes = body.len(), "passage fetched");

    if let Some(cache) = cache {
        cache.put(reference, &body)?;
    }

    Ok(FetchedPassage {
        reference: reference.to_string(),
        body,
        from_cache: false,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use lectio::passage::FetchError;

    use super::*;

    struct StubSource {
        calls: Cell<usize>,
    }

    impl StubSource {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl PassageSource for StubSource {
        fn fetch(&self, reference: &str) -> Result<String, FetchError> {
            self.calls.set(self.calls.get() + 1);
            if reference.starts_with("Jude") {
                return Err(FetchError::EmptyPassage {
                    reference: reference.to_string(),
                });
            }
            Ok(format!("<p>{reference} #{}</p>\n", self.calls.get()))
        }
    }

    #[test]
    fn second_load_is_served_from_cache() {
        let source = StubSource::new();
        let cache = PassageCache::open_in_memory().expect("in-memory cache should open");

        let first = load_passage(&source, Some(&cache), "John 3:16", false)
            .expect("first load should fetch");
        assert!(!first.from_cache);

        let second = load_passage(&source, Some(&cache), "John 3:16", false)
            .expect("second load should hit the cache");
        assert!(second.from_cache);
        assert_eq!(second.body, first.body);
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn refresh_bypasses_and_updates_the_cache() {
        let source = StubSource::new();
        let cache = PassageCache::open_in_memory().expect("in-memory cache should open");

        load_passage(&source, Some(&cache), "Genesis 1", false).expect("load should fetch");
        let refreshed =
            load_passage(&source, Some(&cache), "Genesis 1", true).expect("refresh should fetch");

        assert!(!refreshed.from_cache);
        assert_eq!(refreshed.body, "<p>Genesis 1 #2</p>\n");
        let cached = cache
            .get("Genesis 1")
            .expect("lookup should succeed")
            .expect("passage should be cached");
        assert_eq!(cached.body, refreshed.body);
    }

    #[test]
    fn fetch_without_cache_always_hits_the_source() {
        let source = StubSource::new();
        load_passage(&source, None, "Ruth 1", false).expect("load should fetch");
        load_passage(&source, None, "Ruth 1", false).expect("load should fetch");
        assert_eq!(source.calls.get(), 2);
    }

    #[test]
    fn fetch_errors_are_not_cached() {
        let source = StubSource::new();
        let cache = PassageCache::open_in_memory().expect("in-memory cache should open");

        let err = load_passage(&source, Some(&cache), "Jude 1", false)
            .expect_err("empty passage should fail");
        assert_eq!(err.to_string(), "failed to fetch passage for Jude 1");
        assert_eq!(cache.count().expect("count should succeed"), 0);
    }
}
