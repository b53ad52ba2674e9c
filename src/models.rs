//! Data models shared by the collection, formatting and dispatch stages.
//!
//! This module defines the core data structures of a digest run:
//! - [`CategoryKey`]: The closed set of categories collected per run
//! - [`RankedItem`]: One headline extracted from a news listing
//! - [`IndexQuote`] / [`IndexBoard`]: Market index label/value pairs
//! - [`CollectionResult`]: Everything collected in one run, keyed by category
//! - [`DispatchMessage`]: A rendered message waiting to be sent
//!
//! Nothing here outlives a single run.

use std::collections::BTreeMap;
use std::fmt;

/// The fixed categories collected on every run.
///
/// The five news categories are declared in digest order; [`CategoryKey::NEWS`]
/// is the order used by both the summary and the detail messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryKey {
    Economy,
    DomesticStock,
    WorldStock,
    Commodity,
    Crypto,
    Indices,
}

impl CategoryKey {
    /// Every category, news categories first.
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::Economy,
        CategoryKey::DomesticStock,
        CategoryKey::WorldStock,
        CategoryKey::Commodity,
        CategoryKey::Crypto,
        CategoryKey::Indices,
    ];

    /// The ranked-list categories in their declared digest order.
    pub const NEWS: [CategoryKey; 5] = [
        CategoryKey::Economy,
        CategoryKey::DomesticStock,
        CategoryKey::WorldStock,
        CategoryKey::Commodity,
        CategoryKey::Crypto,
    ];

    /// Stable identifier used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::Economy => "economy",
            CategoryKey::DomesticStock => "domestic_stock",
            CategoryKey::WorldStock => "world_stock",
            CategoryKey::Commodity => "commodity",
            CategoryKey::Crypto => "crypto",
            CategoryKey::Indices => "indices",
        }
    }

    pub fn is_news(self) -> bool {
        self != CategoryKey::Indices
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single headline from a news listing.
///
/// `rank` is the 1-based position of the entry among the raw candidates of its
/// listing, assigned before empty entries are dropped, so ranks within one
/// category are unique but may have gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedItem {
    /// Position in the unfiltered candidate list, starting at 1.
    pub rank: usize,
    /// Display title, already truncated for display.
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
}

/// A market index label and its displayed value.
///
/// Values are opaque display strings; no numeric parsing is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuote {
    pub name: String,
    pub value: String,
}

/// Insertion-ordered name→value mapping of index quotes.
///
/// Inserting a name that is already present replaces its value but keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexBoard {
    quotes: Vec<IndexQuote>,
}

impl IndexBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.quotes.iter_mut().find(|q| q.name == name) {
            Some(existing) => existing.value = value,
            None => self.quotes.push(IndexQuote { name, value }),
        }
    }

    /// Append every quote of `other`, with the same replace-in-place rule.
    pub fn merge(&mut self, other: IndexBoard) {
        for quote in other.quotes {
            self.insert(quote.name, quote.value);
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.quotes
            .iter()
            .find(|q| q.name == name)
            .map(|q| q.value.as_str())
    }

    pub fn quotes(&self) -> &[IndexQuote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Everything collected during one run.
///
/// Every news category always has an entry (possibly empty) and the index
/// board is always present, so readers never have to handle a missing key.
/// The value is assembled once all collection tasks have settled and is only
/// read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionResult {
    listings: BTreeMap<CategoryKey, Vec<RankedItem>>,
    indices: IndexBoard,
}

impl Default for CollectionResult {
    fn default() -> Self {
        Self {
            listings: CategoryKey::NEWS
                .into_iter()
                .map(|key| (key, Vec::new()))
                .collect(),
            indices: IndexBoard::new(),
        }
    }
}

impl CollectionResult {
    /// An all-empty result with every category present.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style setter for one news category. Setting
    /// [`CategoryKey::Indices`] through this method is ignored.
    pub fn with_listing(mut self, key: CategoryKey, items: Vec<RankedItem>) -> Self {
        if key.is_news() {
            self.listings.insert(key, items);
        }
        self
    }

    pub fn with_indices(mut self, indices: IndexBoard) -> Self {
        self.indices = indices;
        self
    }

    /// Items of a news category; the indices key yields an empty slice.
    pub fn listing(&self, key: CategoryKey) -> &[RankedItem] {
        self.listings.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn indices(&self) -> &IndexBoard {
        &self.indices
    }

    /// Whether the given category has anything to show.
    #[cfg(test)]
    pub fn is_category_empty(&self, key: CategoryKey) -> bool {
        match key {
            CategoryKey::Indices => self.indices.is_empty(),
            news => self.listing(news).is_empty(),
        }
    }

    /// Number of entries per category, for logging.
    pub fn counts(&self) -> Vec<(CategoryKey, usize)> {
        CategoryKey::ALL
            .into_iter()
            .map(|key| match key {
                CategoryKey::Indices => (key, self.indices.len()),
                news => (key, self.listing(news).len()),
            })
            .collect()
    }
}

/// A formatted message ready for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchMessage {
    pub body: String,
    pub is_summary: bool,
}

impl DispatchMessage {
    pub fn summary(body: String) -> Self {
        Self {
            body,
            is_summary: true,
        }
    }

    pub fn detail(body: String) -> Self {
        Self {
            body,
            is_summary: false,
        }
    }
}
