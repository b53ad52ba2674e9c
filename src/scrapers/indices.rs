//! Market index extraction.
//!
//! Indices come from two pages: the domestic market page carries the KOSPI
//! and KOSDAQ values under fixed element ids, and the world market page has a
//! table whose first rows hold the major overseas indices.

use super::listing::{element_text, parse_selector};
use crate::error::ExtractError;
use crate::models::IndexBoard;
use scraper::Html;
use tracing::{debug, instrument};

pub const DOMESTIC_INDEX_URL: &str = "https://finance.naver.com/sise/";
pub const WORLD_INDEX_URL: &str = "https://finance.naver.com/world/";

/// Display name and element selector of each domestic index.
pub const DOMESTIC_INDICES: [(&str, &str); 2] = [("KOSPI", "#KOSPI_now"), ("KOSDAQ", "#KOSDAQ_now")];

/// Number of world index rows read from the table.
pub const WORLD_ROW_LIMIT: usize = 5;

const WORLD_ROW_SELECTOR: &str = ".data_lst tr";
const WORLD_NAME_SELECTOR: &str = ".name";
const WORLD_VALUE_SELECTOR: &str = ".point";

/// Read the domestic index values. Missing elements are skipped.
#[instrument(level = "debug", skip_all)]
pub fn extract_domestic_indices(html: &str) -> Result<IndexBoard, ExtractError> {
    let document = Html::parse_document(html);
    let mut board = IndexBoard::new();

    for (name, selector) in DOMESTIC_INDICES {
        let selector = parse_selector(selector)?;
        match document.select(&selector).next() {
            Some(element) => board.insert(name, element_text(&element)),
            None => debug!(index = name, "Domestic index element not found"),
        }
    }

    Ok(board)
}

/// Read up to [`WORLD_ROW_LIMIT`] rows of the world index table.
///
/// Rows lacking either a name or a value cell (header rows, spacers) still
/// count towards the limit. A row with both cells is kept even when the name
/// text is empty.
#[instrument(level = "debug", skip_all)]
pub fn extract_world_indices(html: &str) -> Result<IndexBoard, ExtractError> {
    let row_selector = parse_selector(WORLD_ROW_SELECTOR)?;
    let name_selector = parse_selector(WORLD_NAME_SELECTOR)?;
    let value_selector = parse_selector(WORLD_VALUE_SELECTOR)?;

    let document = Html::parse_document(html);
    let mut board = IndexBoard::new();

    for row in document.select(&row_selector).take(WORLD_ROW_LIMIT) {
        let name = row.select(&name_selector).next().map(|e| element_text(&e));
        let value = row.select(&value_selector).next().map(|e| element_text(&e));
        if let (Some(name), Some(value)) = (name, value) {
            board.insert(name, value);
        }
    }

    debug!(count = board.len(), "Extracted world indices");
    Ok(board)
}
