//! Concurrent collection of every category for one run.
//!
//! One future per category is driven concurrently on the current task. Each
//! future is wrapped by [`contained`], which turns any failure (fetch error,
//! timeout, bad page structure, even a panic) into an empty value for that
//! category alone. [`collect_all`] therefore always returns a complete
//! [`CollectionResult`].

use crate::error::{ExtractError, SourceError};
use crate::fetch::Fetch;
use crate::models::{CategoryKey, CollectionResult, IndexBoard, RankedItem};
use crate::scrapers::indices::{DOMESTIC_INDEX_URL, WORLD_INDEX_URL};
use crate::scrapers::{
    NEWS_SOURCES, SourceProfile, extract_domestic_indices, extract_listing, extract_world_indices,
};
use futures::FutureExt;
use futures::future::join_all;
use std::panic::AssertUnwindSafe;
use tracing::{error, info, instrument};

/// Collect all six categories concurrently.
///
/// Completes once every category has settled. A failing source leaves only
/// its own category empty; this function never fails.
#[instrument(level = "info", skip_all)]
pub async fn collect_all<F: Fetch>(fetcher: &F) -> CollectionResult {
    let listings = join_all(
        NEWS_SOURCES
            .iter()
            .map(|source| contained(source.category, collect_listing(fetcher, source))),
    );
    let indices = contained(
        CategoryKey::Indices,
        collect_indices(fetcher).map(Ok::<_, SourceError>),
    );

    let (listings, indices) = tokio::join!(listings, indices);

    let mut result = CollectionResult::empty().with_indices(indices);
    for (source, items) in NEWS_SOURCES.iter().zip(listings) {
        result = result.with_listing(source.category, items);
    }

    for (category, count) in result.counts() {
        info!(%category, count, "Collected category");
    }
    result
}

/// Fetch and extract one news category.
pub async fn collect_listing<F: Fetch>(
    fetcher: &F,
    source: &SourceProfile,
) -> Result<Vec<RankedItem>, SourceError> {
    fetch_and_extract(fetcher, source.url, |html| extract_listing(html, source)).await
}

/// Fetch both index pages concurrently and merge them, domestic first.
///
/// Each page is contained separately, so an unreachable world page still
/// leaves the domestic values in place.
pub async fn collect_indices<F: Fetch>(fetcher: &F) -> IndexBoard {
    let (mut domestic, world) = tokio::join!(
        contained(
            CategoryKey::Indices,
            fetch_and_extract(fetcher, DOMESTIC_INDEX_URL, extract_domestic_indices),
        ),
        contained(
            CategoryKey::Indices,
            fetch_and_extract(fetcher, WORLD_INDEX_URL, extract_world_indices),
        ),
    );
    domestic.merge(world);
    domestic
}

async fn fetch_and_extract<F, T, X>(fetcher: &F, url: &str, extract: X) -> Result<T, SourceError>
where
    F: Fetch,
    X: FnOnce(&str) -> Result<T, ExtractError>,
{
    let html = fetcher.fetch(url).await?;
    Ok(extract(&html)?)
}

/// Resolve a category task to its value, or to the empty default on failure.
async fn contained<T, Fut>(category: CategoryKey, task: Fut) -> T
where
    T: Default,
    Fut: Future<Output = Result<T, SourceError>>,
{
    match AssertUnwindSafe(task).catch_unwind().await {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            error!(%category, error = %e, "Collection failed; category left empty");
            T::default()
        }
        Err(_) => {
            error!(%category, "Collection task panicked; category left empty");
            T::default()
        }
    }
}
