//! Rendering of a [`CollectionResult`] into chat messages.
//!
//! The digest is one summary message followed by one detail message per
//! non-empty news category. Output uses the chat endpoint's HTML parse mode;
//! every scraped string is escaped before it is embedded.
//!
//! Both functions are pure: the same result and date always render the same
//! text.

use crate::models::{CategoryKey, CollectionResult};
use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Items per category in the summary message.
pub const SUMMARY_ITEMS: usize = 5;

/// Items per detail message.
pub const DETAIL_ITEMS: usize = 10;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━";
const DATE_FORMAT: &str = "%Y년 %m월 %d일 (%a)";

/// Heading of a news category, without the summary/detail suffix.
pub fn category_label(category: CategoryKey) -> &'static str {
    match category {
        CategoryKey::Economy => "💰 경제 뉴스",
        CategoryKey::DomesticStock => "📈 국내 주식 뉴스",
        CategoryKey::WorldStock => "🌍 해외 주식 뉴스",
        CategoryKey::Commodity => "🛢️ 원자재 뉴스",
        CategoryKey::Crypto => "₿ 암호화폐 뉴스",
        CategoryKey::Indices => "📊 주요 시장 지수",
    }
}

/// Render the summary message.
///
/// Header with the run date, the index block if any index was collected,
/// then up to [`SUMMARY_ITEMS`] headlines for each non-empty news category in
/// declared order, and the footer. Empty categories produce no heading.
pub fn format_summary(result: &CollectionResult, date: NaiveDate) -> String {
    let mut message = format!(
        "📰 <b>일일 경제 뉴스 TOP10</b>\n📅 {}\n\n{RULE}\n\n",
        date.format(DATE_FORMAT)
    );

    let indices = result.indices();
    if !indices.is_empty() {
        message.push_str(&format!("<b>{}</b>\n", category_label(CategoryKey::Indices)));
        for quote in indices.quotes() {
            message.push_str(&format!(
                "  • {}: {}\n",
                encode_text(&quote.name),
                encode_text(&quote.value)
            ));
        }
        message.push_str(&format!("\n{RULE}\n\n"));
    }

    for category in CategoryKey::NEWS {
        let items = result.listing(category);
        if items.is_empty() {
            continue;
        }
        message.push_str(&format!("<b>{} TOP{SUMMARY_ITEMS}</b>\n\n", category_label(category)));
        for item in items.iter().take(SUMMARY_ITEMS) {
            message.push_str(&format!("{}. {}\n", item.rank, encode_text(&item.title)));
        }
        message.push('\n');
    }

    message.push_str(&format!("{RULE}\n{}\n", footer()));
    message
}

/// Render the detail message of one news category.
///
/// Returns `None` when the category has no items, and always for
/// [`CategoryKey::Indices`], which has no detail form.
pub fn format_detail(result: &CollectionResult, category: CategoryKey) -> Option<String> {
    if !category.is_news() {
        return None;
    }
    let items = result.listing(category);
    if items.is_empty() {
        return None;
    }

    let mut message = format!("<b>{} 상세</b>\n\n", category_label(category));
    for item in items.iter().take(DETAIL_ITEMS) {
        message.push_str(&format!(
            "{}. <a href=\"{}\">{}</a>\n\n",
            item.rank,
            encode_double_quoted_attribute(&item.link),
            encode_text(&item.title)
        ));
    }
    Some(message)
}

fn footer() -> String {
    format!("🤖 Daily Market Digest v{}", env!("CARGO_PKG_VERSION"))
}
