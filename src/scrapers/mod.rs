//! Source extractors turning fetched pages into listings and index quotes.
//!
//! # Sources
//!
//! | Category | Page | Selector | Links |
//! |----------|------|----------|-------|
//! | economy | Naver News economy section | `.sa_text_title` | as published |
//! | domestic stock | Naver Finance main news | `.articleSubject a` | finance origin |
//! | world stock | Naver Finance world | `.news_list li a` | finance origin |
//! | commodity | Naver News search | `.news_tit` | as published |
//! | crypto | Naver News search | `.news_tit` | as published |
//! | indices | Naver Finance sise + world | `#KOSPI_now`, `.data_lst tr` | n/a |
//!
//! Extractors are pure functions over the page body; fetching and failure
//! containment live in [`crate::collector`].

pub mod indices;
pub mod listing;

pub use indices::{extract_domestic_indices, extract_world_indices};
pub use listing::{NEWS_SOURCES, SourceProfile, extract_listing};
