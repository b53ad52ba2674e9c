//! Ranked headline extraction shared by every news category.
//!
//! Each category is one [`SourceProfile`]: the page to fetch, the CSS selector
//! matching headline anchors, and how relative links are resolved. The
//! extraction itself is identical across categories.
//!
//! # Ranking
//!
//! Ranks come from the position among the first [`CANDIDATE_LIMIT`] matches,
//! assigned *before* entries with an empty title or link are dropped. A page
//! whose third headline is blank therefore yields ranks `1, 2, 4, ...`.

use crate::error::ExtractError;
use crate::models::{CategoryKey, RankedItem};
use crate::utils::{TITLE_MAX_CHARS, truncate_title};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

/// Number of leading matches considered per page.
pub const CANDIDATE_LIMIT: usize = 10;

/// How an entry's `href` becomes an absolute URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRule {
    /// Use the link as published, resolving it against the page URL if relative.
    AsPublished,
    /// Resolve the link against a fixed site origin.
    Origin(&'static str),
}

impl LinkRule {
    /// Resolve `href` found on `page_url`. Returns `None` if no valid URL results.
    pub fn resolve(self, page_url: &str, href: &str) -> Option<String> {
        let base = match self {
            LinkRule::AsPublished => page_url,
            LinkRule::Origin(origin) => origin,
        };
        let base = Url::parse(base).ok()?;
        base.join(href).ok().map(|u| u.to_string())
    }
}

/// Where and how one news category is scraped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceProfile {
    pub category: CategoryKey,
    pub url: &'static str,
    pub selector: &'static str,
    pub link_rule: LinkRule,
}

/// The five news sources in digest order.
pub static NEWS_SOURCES: [SourceProfile; 5] = [
    SourceProfile {
        category: CategoryKey::Economy,
        url: "https://news.naver.com/section/101",
        selector: ".sa_text_title",
        link_rule: LinkRule::AsPublished,
    },
    SourceProfile {
        category: CategoryKey::DomesticStock,
        url: "https://finance.naver.com/news/mainnews.naver",
        selector: ".articleSubject a",
        link_rule: LinkRule::Origin("https://finance.naver.com"),
    },
    SourceProfile {
        category: CategoryKey::WorldStock,
        url: "https://finance.naver.com/world/",
        selector: ".news_list li a",
        link_rule: LinkRule::Origin("https://finance.naver.com"),
    },
    SourceProfile {
        category: CategoryKey::Commodity,
        url: "https://search.naver.com/search.naver?where=news&query=원자재+금+유가+시세",
        selector: ".news_tit",
        link_rule: LinkRule::AsPublished,
    },
    SourceProfile {
        category: CategoryKey::Crypto,
        url: "https://search.naver.com/search.naver?where=news&query=비트코인+암호화폐+이더리움",
        selector: ".news_tit",
        link_rule: LinkRule::AsPublished,
    },
];

/// Look up the profile of a news category. `None` for [`CategoryKey::Indices`].
#[cfg(test)]
pub fn profile_for(category: CategoryKey) -> Option<&'static SourceProfile> {
    NEWS_SOURCES.iter().find(|p| p.category == category)
}

/// Parse a static selector, mapping the parser error into [`ExtractError`].
pub fn parse_selector(selector: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector,
        reason: e.to_string(),
    })
}

/// Concatenate the trimmed text nodes of an element.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Extract the ranked headlines of one page.
///
/// # Errors
///
/// Returns [`ExtractError::Selector`] if the profile's selector is invalid.
/// A page with no matching elements is not an error and yields an empty list.
#[instrument(level = "debug", skip_all, fields(category = %profile.category))]
pub fn extract_listing(html: &str, profile: &SourceProfile) -> Result<Vec<RankedItem>, ExtractError> {
    let selector = parse_selector(profile.selector)?;
    let document = Html::parse_document(html);

    let items: Vec<RankedItem> = document
        .select(&selector)
        .take(CANDIDATE_LIMIT)
        .enumerate()
        .filter_map(|(index, element)| {
            let rank = index + 1;
            let title = element_text(&element);
            let href = element.value().attr("href").unwrap_or("").trim();
            if title.is_empty() || href.is_empty() {
                debug!(rank, "Skipping entry without title or link");
                return None;
            }
            let Some(link) = profile.link_rule.resolve(profile.url, href) else {
                debug!(rank, href, "Skipping entry with unresolvable link");
                return None;
            };
            Some(RankedItem {
                rank,
                title: truncate_title(&title, TITLE_MAX_CHARS),
                link,
            })
        })
        .collect();

    debug!(count = items.len(), "Extracted listing");
    Ok(items)
}
